//! Movie lifecycle and classification types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Publication state of a movie. Only `Public` movies show up in
/// listings, rankings and review targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieStatus {
    Public,
    Private,
}

/// Returned when a status string is neither `public` nor `private`.
#[derive(Debug, thiserror::Error)]
#[error("unknown movie status: {0}")]
pub struct UnknownStatus(pub String);

impl MovieStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Category used by `top-rated` / `most-rated` when the query omits `type`.
pub const DEFAULT_MOVIE_TYPE: &str = "Short Film";

/// Genres accepted on movie create/update.
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "Game-Show",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "News",
    "Reality-TV",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Talk-Show",
    "Thriller",
    "War",
    "Western",
];

pub fn is_known_genre(genre: &str) -> bool {
    GENRES.contains(&genre)
}
