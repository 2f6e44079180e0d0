// Actor Domain Model

use serde::{Deserialize, Serialize};

/// Actor ID (store-assigned rowid, immutable once created)
pub type ActorId = i64;

/// Actor entity. Does not own Movies; the association rows point the other way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub surname: String,
}

/// Write-side input for creating or replacing an actor. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActor {
    pub name: String,
    pub surname: String,
}

impl NewActor {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
        }
    }
}
