// Movie Domain Model

use crate::domain::{Actor, ActorId};
use serde::{Deserialize, Serialize};

/// Movie ID (store-assigned rowid, immutable once created)
pub type MovieId = i64;

/// Movie entity as read back from the store: the nested graph shape,
/// with its associated actors resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub description: Option<String>,
    pub actors: Vec<Actor>,
}

/// Movie row without the actor list, as returned by actor-side lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub description: Option<String>,
}

/// Write-side input for creating or replacing a movie. `actor_ids` is the
/// complete association set: updates replace, they never merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub description: Option<String>,
    pub actor_ids: Vec<ActorId>,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        year: i32,
        description: Option<String>,
        actor_ids: Vec<ActorId>,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            year,
            description,
            actor_ids,
        }
    }
}
