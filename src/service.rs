//! Data access for heroes.
//!
//! [`HeroService`] never hands an error to its caller. A failed operation is
//! reported once to the developer channel ([`ErrorReporter`]), once to the
//! session [`MessageService`], and then answered with a fallback value.

use crate::core;
use crate::error::HeroError;
use crate::message::MessageService;
use crate::types::{Hero, HeroId, Lookup, NewHero};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

pub(crate) const LOG_PREFIX: &str = "HeroService: ";

#[async_trait]
pub trait HeroService: Send + Sync {
    /// Whole collection; `[]` on failure.
    async fn get_heroes(&self) -> Vec<Hero>;

    /// Single hero; `NotFound` when absent or on failure.
    async fn get_hero(&self, id: HeroId) -> Lookup;

    /// Replaces the stored hero with the same id.
    async fn update_hero(&self, hero: &Hero) -> Option<Hero>;

    /// Inserts a hero; the returned value carries the assigned id.
    async fn add_hero(&self, hero: NewHero) -> Option<Hero>;

    async fn delete_hero(&self, hero: &Hero) -> Option<()>;

    /// Heroes whose name contains `term`, ignoring case. A blank term
    /// yields `[]` without touching the store.
    async fn search_heroes(&self, term: &str) -> Vec<Hero>;
}

/// Developer-facing sink for raw failure records.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, operation: &str, error: &HeroError);
}

/// Emits each failure as a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, operation: &str, error: &HeroError) {
        tracing::error!(operation, method = %error.method, url = %error.url, "{error:?}");
    }
}

pub(crate) fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}

pub(crate) fn matching(heroes: Vec<Hero>, term: &str) -> Vec<Hero> {
    let needle = term.trim().to_lowercase();
    heroes
        .into_iter()
        .filter(|hero| hero.name.to_lowercase().contains(&needle))
        .collect()
}

/// [`HeroService`] backed by a REST collection endpoint.
pub struct RemoteHeroService {
    client: Client,
    base_url: String,
    messages: Arc<MessageService>,
    reporter: Arc<dyn ErrorReporter>,
}

impl RemoteHeroService {
    pub fn new(client: Client, base_url: impl Into<String>, messages: Arc<MessageService>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            messages,
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn log(&self, message: &str) {
        self.messages.add(format!("{LOG_PREFIX}{message}"));
    }

    fn recover<T>(&self, operation: &str, error: HeroError, fallback: T) -> T {
        self.reporter.report(operation, &error);
        self.log(&format!("{operation} failed: {error}"));
        fallback
    }
}

#[async_trait]
impl HeroService for RemoteHeroService {
    async fn get_heroes(&self) -> Vec<Hero> {
        match core::get_heroes(&self.client, &self.base_url).await {
            Ok(heroes) => {
                self.log("Fetched heroes");
                heroes
            }
            Err(e) => self.recover("get_heroes", e, Vec::new()),
        }
    }

    async fn get_hero(&self, id: HeroId) -> Lookup {
        match core::get_hero(&self.client, &self.base_url, id).await {
            Ok(hero) => {
                self.log(&format!("Fetched hero with id {id}"));
                Lookup::Found(hero)
            }
            Err(e) => self.recover("get_hero", e, Lookup::NotFound),
        }
    }

    async fn update_hero(&self, hero: &Hero) -> Option<Hero> {
        match core::put_hero(&self.client, &self.base_url, hero).await {
            Ok(updated) => {
                self.log(&format!("Updated hero with id {}", hero.id));
                Some(updated)
            }
            Err(e) => self.recover("update_hero", e, None),
        }
    }

    async fn add_hero(&self, hero: NewHero) -> Option<Hero> {
        match core::post_hero(&self.client, &self.base_url, &hero).await {
            Ok(created) => {
                self.log(&format!("Added hero with id {}", created.id));
                Some(created)
            }
            Err(e) => self.recover("add_hero", e, None),
        }
    }

    async fn delete_hero(&self, hero: &Hero) -> Option<()> {
        match core::delete_hero(&self.client, &self.base_url, hero.id).await {
            Ok(()) => {
                self.log(&format!("deleted hero id={}", hero.id));
                Some(())
            }
            Err(e) => self.recover("delete_hero", e, None),
        }
    }

    async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if is_blank(term) {
            return Vec::new();
        }

        match core::get_heroes(&self.client, &self.base_url).await {
            Ok(heroes) => {
                self.log(&format!("found heroes matching \"{term}\""));
                matching(heroes, term)
            }
            Err(e) => self.recover("search_heroes", e, Vec::new()),
        }
    }
}
