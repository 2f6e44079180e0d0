// Movie Repository Port (Interface)

use crate::domain::{Movie, MovieId, NewMovie};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Movie persistence.
///
/// A movie write spans the movie row and its association rows; all of it
/// commits or none of it does. `NewMovie::actor_ids` is always the complete
/// association set: update replaces the previous set rather than merging.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// List all movies with their actors resolved, in insertion order.
    async fn list(&self) -> Result<Vec<Movie>>;

    /// Find a movie by id, actors resolved. Absent is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>>;

    /// Insert a movie plus one association row per actor id, returning the
    /// store-assigned id. An actor id that does not exist fails the whole
    /// transaction with `WriteFailed`; nothing is persisted.
    async fn insert(&self, movie: &NewMovie) -> Result<MovieId>;

    /// Update the movie's scalar fields and replace its association set.
    /// `MovieNotFound` if no row matched; the store is left unchanged.
    async fn update(&self, id: MovieId, movie: &NewMovie) -> Result<()>;

    /// Delete the movie and its association rows, atomically.
    /// `MovieNotFound` if the movie does not exist.
    async fn delete(&self, id: MovieId) -> Result<()>;
}
