use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type HeroId = i64;

/// Id used when the route carries no parseable id. No store hands it out.
pub const UNKNOWN_HERO_ID: HeroId = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: HeroId,
    pub name: String,
    /// Descriptive fields the store keeps alongside the name. Carried through
    /// untouched so a full-payload update does not erase them.
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl Hero {
    pub fn new(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Body of a create request; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Result of a single-hero lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Hero),
    NotFound,
}

impl Lookup {
    pub fn into_option(self) -> Option<Hero> {
        match self {
            Lookup::Found(hero) => Some(hero),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl From<Option<Hero>> for Lookup {
    fn from(hero: Option<Hero>) -> Self {
        hero.map_or(Lookup::NotFound, Lookup::Found)
    }
}

// mockapi.io serializes ids as strings ("7"), a local store as integers.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<HeroId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(HeroId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
