// SQLite MovieRepository Implementation
//
// The write paths here span three tables: the movie row, then one
// movie_actor row per associated actor. Everything runs inside one
// transaction under the shared write lock; any failure rolls the whole
// thing back so associations are never partially applied.

use crate::sqlx_error::{map_sqlx_error, map_write_error};
use crate::transaction::rollback;
use crate::write_lock::WriteLock;
use async_trait::async_trait;
use cinevault_core::domain::{assemble_movies, ActorId, Movie, MovieActorRow, MovieId, NewMovie};
use cinevault_core::error::{AppError, Result};
use cinevault_core::port::MovieRepository;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tracing::error;

// One row per (movie, actor) pair; one row with NULL actor columns for a
// movie without associations. Ordered so the reconstructor sees each
// movie's rows contiguously.
const MOVIE_GRAPH_QUERY: &str = r#"
SELECT movie.id AS movie_id, movie.title, movie.director, movie.year, movie.description,
       actor.id AS actor_id, actor.name AS actor_name, actor.surname AS actor_surname
FROM movie
LEFT JOIN movie_actor ON movie_actor.movie_id = movie.id
LEFT JOIN actor ON actor.id = movie_actor.actor_id
"#;

pub struct SqliteMovieRepository {
    pool: SqlitePool,
    write_lock: Arc<WriteLock>,
}

impl SqliteMovieRepository {
    pub fn new(pool: SqlitePool, write_lock: Arc<WriteLock>) -> Self {
        Self { pool, write_lock }
    }

    async fn insert_in_tx(tx: &mut Transaction<'_, Sqlite>, movie: &NewMovie) -> Result<MovieId> {
        let result =
            sqlx::query("INSERT INTO movie (title, director, year, description) VALUES (?, ?, ?, ?)")
                .bind(&movie.title)
                .bind(&movie.director)
                .bind(movie.year)
                .bind(&movie.description)
                .execute(&mut **tx)
                .await
                .map_err(map_write_error)?;

        let movie_id = result.last_insert_rowid();
        if movie_id == 0 {
            return Err(AppError::WriteFailed(
                "No id assigned for inserted movie".to_string(),
            ));
        }

        Self::insert_associations(tx, movie_id, &movie.actor_ids).await?;

        Ok(movie_id)
    }

    async fn update_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        id: MovieId,
        movie: &NewMovie,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE movie SET title = ?, director = ?, year = ?, description = ? WHERE id = ?",
        )
        .bind(&movie.title)
        .bind(&movie.director)
        .bind(movie.year)
        .bind(&movie.description)
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::MovieNotFound(id));
        }

        // Full replace: drop the old association set, insert the new one.
        sqlx::query("DELETE FROM movie_actor WHERE movie_id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;

        Self::insert_associations(tx, id, &movie.actor_ids).await?;

        Ok(())
    }

    async fn delete_in_tx(tx: &mut Transaction<'_, Sqlite>, id: MovieId) -> Result<()> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM movie WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_write_error)?;

        if exists.is_none() {
            return Err(AppError::MovieNotFound(id));
        }

        sqlx::query("DELETE FROM movie_actor WHERE movie_id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;

        sqlx::query("DELETE FROM movie WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;

        Ok(())
    }

    // A nonexistent actor id trips the foreign key constraint, which
    // surfaces as WriteFailed and aborts the enclosing transaction.
    // Duplicate ids in the input are not deduplicated; the repeated pair
    // is simply inserted again.
    async fn insert_associations(
        tx: &mut Transaction<'_, Sqlite>,
        movie_id: MovieId,
        actor_ids: &[ActorId],
    ) -> Result<()> {
        for actor_id in actor_ids {
            sqlx::query("INSERT INTO movie_actor (movie_id, actor_id) VALUES (?, ?)")
                .bind(movie_id)
                .bind(actor_id)
                .execute(&mut **tx)
                .await
                .map_err(map_write_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl MovieRepository for SqliteMovieRepository {
    async fn list(&self) -> Result<Vec<Movie>> {
        let query = format!("{} ORDER BY movie.id, movie_actor.id", MOVIE_GRAPH_QUERY);
        let rows: Vec<MovieJoinRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(assemble_movies(
            rows.into_iter().map(MovieJoinRow::into_row).collect(),
        ))
    }

    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>> {
        let query = format!(
            "{} WHERE movie.id = ? ORDER BY movie_actor.id",
            MOVIE_GRAPH_QUERY
        );
        let rows: Vec<MovieJoinRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        // No rows at all means the movie does not exist; absent, not an error.
        Ok(assemble_movies(rows.into_iter().map(MovieJoinRow::into_row).collect())
            .into_iter()
            .next())
    }

    async fn insert(&self, movie: &NewMovie) -> Result<MovieId> {
        let _guard = self.write_lock.acquire().await;
        let mut tx = self.pool.begin().await.map_err(map_write_error)?;

        match Self::insert_in_tx(&mut tx, movie).await {
            Ok(id) => {
                tx.commit().await.map_err(map_write_error)?;
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "Movie insert failed");
                rollback(tx, "movie insert").await;
                Err(e)
            }
        }
    }

    async fn update(&self, id: MovieId, movie: &NewMovie) -> Result<()> {
        let _guard = self.write_lock.acquire().await;
        let mut tx = self.pool.begin().await.map_err(map_write_error)?;

        match Self::update_in_tx(&mut tx, id, movie).await {
            Ok(()) => {
                tx.commit().await.map_err(map_write_error)?;
                Ok(())
            }
            Err(e) => {
                if !e.is_not_found() {
                    error!(movie_id = id, error = %e, "Movie update failed");
                }
                rollback(tx, "movie update").await;
                Err(e)
            }
        }
    }

    async fn delete(&self, id: MovieId) -> Result<()> {
        let _guard = self.write_lock.acquire().await;
        let mut tx = self.pool.begin().await.map_err(map_write_error)?;

        match Self::delete_in_tx(&mut tx, id).await {
            Ok(()) => {
                tx.commit().await.map_err(map_write_error)?;
                Ok(())
            }
            Err(e) => {
                if !e.is_not_found() {
                    error!(movie_id = id, error = %e, "Movie delete failed");
                }
                rollback(tx, "movie delete").await;
                Err(e)
            }
        }
    }
}

/// SQLite row representation of the movie/actor join
#[derive(Debug, sqlx::FromRow)]
struct MovieJoinRow {
    movie_id: i64,
    title: String,
    director: String,
    year: i32,
    description: Option<String>,
    actor_id: Option<i64>,
    actor_name: Option<String>,
    actor_surname: Option<String>,
}

impl MovieJoinRow {
    fn into_row(self) -> MovieActorRow {
        MovieActorRow {
            movie_id: self.movie_id,
            title: self.title,
            director: self.director,
            year: self.year,
            description: self.description,
            actor_id: self.actor_id,
            actor_name: self.actor_name,
            actor_surname: self.actor_surname,
        }
    }
}
