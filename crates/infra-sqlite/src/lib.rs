// Cinevault Infrastructure - SQLite Adapter
// Implements: ActorRepository, MovieRepository over a sqlx pool

mod actor_repository;
mod connection;
mod migration;
mod movie_repository;
mod sqlx_error;
mod transaction;
mod write_lock;

pub use actor_repository::SqliteActorRepository;
pub use connection::create_pool;
pub use migration::run_migrations;
pub use movie_repository::SqliteMovieRepository;
pub use write_lock::WriteLock;

// Note: sqlx::Error conversion is handled by the helper functions in
// sqlx_error due to Rust's orphan rules (cannot implement From<sqlx::Error>
// for AppError here)
