//! View/edit a single hero.

use crate::route::{Location, RouteSnapshot};
use crate::service::HeroService;
use crate::types::{Hero, Lookup};
use std::sync::Arc;

pub struct HeroDetail {
    route: RouteSnapshot,
    service: Arc<dyn HeroService>,
    location: Arc<dyn Location>,
    hero: Option<Hero>,
}

impl HeroDetail {
    pub fn new(
        route: RouteSnapshot,
        service: Arc<dyn HeroService>,
        location: Arc<dyn Location>,
    ) -> Self {
        Self {
            route,
            service,
            location,
            hero: None,
        }
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    /// Fetches the hero named by the route's `id`. State only changes once
    /// the lookup has completed, so dropping this future leaves it untouched.
    /// Once a hero is shown, later calls do nothing.
    pub async fn load(&mut self) {
        if self.hero.is_some() {
            return;
        }
        let id = self.route.id_param("id");
        if let Lookup::Found(hero) = self.service.get_hero(id).await {
            self.hero = Some(hero);
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(hero) = self.hero.as_mut() {
            hero.name = name.into();
        }
    }

    /// Sends the edited hero back to the store, then leaves the view.
    pub async fn save(&self) {
        let Some(hero) = self.hero.as_ref() else {
            return;
        };
        self.service.update_hero(hero).await;
        self.go_back();
    }

    pub fn go_back(&self) {
        self.location.back();
    }
}
