// Actor Repository Port (Interface)

use crate::domain::{Actor, ActorId, MovieSummary, NewActor};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Actor persistence.
///
/// Reads never block on the write lock; mutations serialize on it and run
/// inside a transaction whose effects are all-or-nothing.
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// List all actors in insertion order.
    async fn list(&self) -> Result<Vec<Actor>>;

    /// Find an actor by id. Absent is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: ActorId) -> Result<Option<Actor>>;

    /// Movies the actor appears in. Fails with `ActorNotFound` if the actor
    /// does not exist; an existing actor with no movies yields an empty vec.
    async fn movies_of(&self, id: ActorId) -> Result<Vec<MovieSummary>>;

    /// Insert a new actor and return the store-assigned id.
    async fn insert(&self, actor: &NewActor) -> Result<ActorId>;

    /// Update name and surname. `ActorNotFound` if no row matched.
    async fn update(&self, id: ActorId, actor: &NewActor) -> Result<()>;

    /// Delete the actor and every association row referencing it, atomically.
    /// `ActorNotFound` if the actor does not exist.
    async fn delete(&self, id: ActorId) -> Result<()>;
}
