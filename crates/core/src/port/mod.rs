// Port Layer - Interfaces the adapters implement

pub mod actor_repository;
pub mod movie_repository;

// Re-exports
pub use actor_repository::ActorRepository;
pub use movie_repository::MovieRepository;
