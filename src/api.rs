use crate::types::HeroId;

pub const API_HEROES: &str = "https://5dc46d6713d21600147e63f2.mockapi.io/heroes";

pub fn api_hero(base: &str, id: HeroId) -> String {
    format!("{}/{id}", base.trim_end_matches('/'))
}
