use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[cfg(feature = "graphql")]
use async_graphql::{Enum, SimpleObject};

/// Generic upstream record. Only the identifier is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResource {
    pub id: u32,
}

impl RawResource {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[cfg_attr(feature = "graphql", derive(Enum))]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    #[strum(serialize = "Sci-Fi")]
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Horror,
    Romance,
    Thriller,
    Animation,
}

/// Display-ready movie built from a raw resource and its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub genre: Genre,
    pub year: u16,
    pub rating: f32,
    pub duration: String,
    pub poster: String,
    pub thumbnail: String,
    pub backdrop: String,
    pub featured: bool,
    /// Only populated on detail fetches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct Review {
    pub id: u32,
    pub author: String,
    pub email: String,
    pub content: String,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct User {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}
