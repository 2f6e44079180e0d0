// Domain Layer - Pure entities and the row-to-graph reconstructor

pub mod actor;
pub mod graph;
pub mod movie;

// Re-exports
pub use actor::{Actor, ActorId, NewActor};
pub use graph::{assemble_movies, MovieActorRow};
pub use movie::{Movie, MovieId, MovieSummary, NewMovie};
