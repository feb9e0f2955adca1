//! In-memory hero store, used when no endpoint is available.

use crate::message::MessageService;
use crate::service::{is_blank, matching, HeroService, LOG_PREFIX};
use crate::types::{Hero, HeroId, Lookup, NewHero};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

pub const HEROES: [(HeroId, &str); 10] = [
    (11, "Mr. Nice"),
    (12, "Narco"),
    (13, "Bombasto"),
    (14, "Celeritas"),
    (15, "Magneta"),
    (16, "RubberMan"),
    (17, "Dynama"),
    (18, "Dr IQ"),
    (19, "Magma"),
    (20, "Tornado"),
];

/// First id handed out by an empty store.
const FIRST_ID: HeroId = 11;

pub fn mock_heroes() -> Vec<Hero> {
    HEROES.iter().map(|&(id, name)| Hero::new(id, name)).collect()
}

pub struct InMemoryHeroService {
    heroes: Mutex<Vec<Hero>>,
    messages: Arc<MessageService>,
}

impl InMemoryHeroService {
    /// Store seeded with [`HEROES`].
    pub fn new(messages: Arc<MessageService>) -> Self {
        Self::with_heroes(mock_heroes(), messages)
    }

    pub fn with_heroes(heroes: Vec<Hero>, messages: Arc<MessageService>) -> Self {
        Self {
            heroes: Mutex::new(heroes),
            messages,
        }
    }

    fn log(&self, message: &str) {
        self.messages.add(format!("{LOG_PREFIX}{message}"));
    }

    fn gen_id(heroes: &[Hero]) -> HeroId {
        heroes.iter().map(|hero| hero.id).max().map_or(FIRST_ID, |id| id + 1)
    }
}

#[async_trait]
impl HeroService for InMemoryHeroService {
    async fn get_heroes(&self) -> Vec<Hero> {
        let heroes = self.heroes.lock().clone();
        self.log("fetched heroes");
        heroes
    }

    async fn get_hero(&self, id: HeroId) -> Lookup {
        let hero = self.heroes.lock().iter().find(|hero| hero.id == id).cloned();
        self.log(&format!("fetched hero id={id}"));
        Lookup::from(hero)
    }

    async fn update_hero(&self, hero: &Hero) -> Option<Hero> {
        let updated = {
            let mut heroes = self.heroes.lock();
            let slot = heroes.iter_mut().find(|stored| stored.id == hero.id)?;
            *slot = hero.clone();
            slot.clone()
        };
        self.log(&format!("Updated hero with id {}", hero.id));
        Some(updated)
    }

    async fn add_hero(&self, hero: NewHero) -> Option<Hero> {
        let created = {
            let mut heroes = self.heroes.lock();
            let created = Hero::new(Self::gen_id(&heroes), hero.name);
            heroes.push(created.clone());
            created
        };
        self.log(&format!("Added hero with id {}", created.id));
        Some(created)
    }

    async fn delete_hero(&self, hero: &Hero) -> Option<()> {
        {
            let mut heroes = self.heroes.lock();
            let index = heroes.iter().position(|stored| stored.id == hero.id)?;
            heroes.remove(index);
        }
        self.log(&format!("deleted hero id={}", hero.id));
        Some(())
    }

    async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if is_blank(term) {
            return Vec::new();
        }
        let heroes = self.heroes.lock().clone();
        self.log(&format!("found heroes matching \"{term}\""));
        matching(heroes, term)
    }
}
