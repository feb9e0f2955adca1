//! Tour of Heroes: list, search, edit and delete heroes held by a REST
//! collection endpoint or an in-memory store.

pub mod api;
pub mod config;
pub mod core;
pub mod detail;
pub mod error;
pub mod message;
pub mod mock;
pub mod route;
pub mod service;
pub mod types;

pub use detail::HeroDetail;
pub use error::HeroError;
pub use message::MessageService;
pub use mock::InMemoryHeroService;
pub use service::{ErrorReporter, HeroService, RemoteHeroService, TracingReporter};
pub use types::{Hero, HeroId, Lookup, NewHero};
