//! Concurrency tests: write serialization, lock release on failure,
//! and reads proceeding alongside writes.

use std::sync::Arc;
use std::time::Duration;

use cinevault_core::domain::{NewActor, NewMovie};
use cinevault_core::error::AppError;
use cinevault_core::port::{ActorRepository, MovieRepository};
use cinevault_infra_sqlite::{
    create_pool, run_migrations, SqliteActorRepository, SqliteMovieRepository, WriteLock,
};
use tokio::task::JoinSet;

struct TestStore {
    actors: Arc<SqliteActorRepository>,
    movies: Arc<SqliteMovieRepository>,
    // Keeps the database file alive for the duration of the test
    _dir: Option<tempfile::TempDir>,
}

async fn setup_memory() -> TestStore {
    build("sqlite::memory:".to_string(), None).await
}

/// File-backed store so pooled connections can actually run in parallel.
async fn setup_file() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("cinevault.db").display());
    build(url, Some(dir)).await
}

async fn build(url: String, dir: Option<tempfile::TempDir>) -> TestStore {
    let pool = create_pool(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let write_lock = Arc::new(WriteLock::new());
    TestStore {
        actors: Arc::new(SqliteActorRepository::new(
            pool.clone(),
            Arc::clone(&write_lock),
        )),
        movies: Arc::new(SqliteMovieRepository::new(pool, write_lock)),
        _dir: dir,
    }
}

#[tokio::test]
async fn failed_write_releases_the_lock() {
    let store = setup_memory().await;

    // This write acquires the lock and fails on the FK constraint
    let err = store
        .movies
        .insert(&NewMovie::new("Ghost", "Nobody", 1999, None, vec![77]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::WriteFailed(_)));

    // An independent write must go through without deadlocking
    let id = tokio::time::timeout(
        Duration::from_secs(5),
        store.actors.insert(&NewActor::new("Tom", "Hardy")),
    )
    .await
    .expect("write lock was not released after the failed transaction")
    .unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn not_found_write_releases_the_lock() {
    let store = setup_memory().await;

    let err = store.actors.delete(12).await.unwrap_err();
    assert!(matches!(err, AppError::ActorNotFound(12)));

    tokio::time::timeout(
        Duration::from_secs(5),
        store.actors.insert(&NewActor::new("Tom", "Hardy")),
    )
    .await
    .expect("write lock was not released after the rolled-back delete")
    .unwrap();
}

#[tokio::test]
async fn concurrent_writers_all_land() {
    let store = setup_file().await;

    let mut tasks = JoinSet::new();
    for i in 0..20 {
        let actors = Arc::clone(&store.actors);
        tasks.spawn(async move {
            actors
                .insert(&NewActor::new(format!("Actor{}", i), "Surname"))
                .await
        });
    }

    let mut ids = Vec::new();
    while let Some(res) = tasks.join_next().await {
        ids.push(res.unwrap().unwrap());
    }

    // Every insert committed and every assigned id is distinct
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert_eq!(store.actors.list().await.unwrap().len(), 20);
}

#[tokio::test]
async fn reads_run_alongside_writes_and_see_committed_state_only() {
    let store = setup_file().await;

    let hardy = store
        .actors
        .insert(&NewActor::new("Tom", "Hardy"))
        .await
        .unwrap();

    let writer = {
        let movies = Arc::clone(&store.movies);
        tokio::spawn(async move {
            for i in 0..10 {
                movies
                    .insert(&NewMovie::new(
                        format!("Movie{}", i),
                        "Director",
                        2000 + i,
                        None,
                        vec![hardy],
                    ))
                    .await
                    .unwrap();
            }
        })
    };

    let reader = {
        let movies = Arc::clone(&store.movies);
        tokio::spawn(async move {
            for _ in 0..50 {
                // A movie is never visible without its association set:
                // every committed movie here was written with one actor.
                for movie in movies.list().await.unwrap() {
                    assert_eq!(movie.actors.len(), 1, "partial write became visible");
                }
                tokio::task::yield_now().await;
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    assert_eq!(store.movies.list().await.unwrap().len(), 10);
}

#[tokio::test]
async fn interleaved_movie_and_actor_writes_stay_consistent() {
    let store = setup_file().await;

    let seed = store
        .actors
        .insert(&NewActor::new("Seed", "Actor"))
        .await
        .unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..10 {
        let actors = Arc::clone(&store.actors);
        let movies = Arc::clone(&store.movies);
        tasks.spawn(async move {
            let a = actors
                .insert(&NewActor::new(format!("A{}", i), "S"))
                .await?;
            movies
                .insert(&NewMovie::new(
                    format!("M{}", i),
                    "D",
                    2020,
                    None,
                    vec![seed, a],
                ))
                .await
        });
    }

    while let Some(res) = tasks.join_next().await {
        res.unwrap().unwrap();
    }

    let movies = store.movies.list().await.unwrap();
    assert_eq!(movies.len(), 10);
    for movie in &movies {
        assert_eq!(movie.actors.len(), 2);
    }

    let filmography = store.actors.movies_of(seed).await.unwrap();
    assert_eq!(filmography.len(), 10);
}
