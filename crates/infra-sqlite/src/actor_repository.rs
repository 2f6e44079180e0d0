// SQLite ActorRepository Implementation

use crate::sqlx_error::{map_sqlx_error, map_write_error};
use crate::transaction::rollback;
use crate::write_lock::WriteLock;
use async_trait::async_trait;
use cinevault_core::domain::{Actor, ActorId, MovieSummary, NewActor};
use cinevault_core::error::{AppError, Result};
use cinevault_core::port::ActorRepository;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::sync::Arc;
use tracing::error;

pub struct SqliteActorRepository {
    pool: SqlitePool,
    write_lock: Arc<WriteLock>,
}

impl SqliteActorRepository {
    pub fn new(pool: SqlitePool, write_lock: Arc<WriteLock>) -> Self {
        Self { pool, write_lock }
    }

    async fn insert_in_tx(tx: &mut Transaction<'_, Sqlite>, actor: &NewActor) -> Result<ActorId> {
        let result = sqlx::query("INSERT INTO actor (name, surname) VALUES (?, ?)")
            .bind(&actor.name)
            .bind(&actor.surname)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;

        let actor_id = result.last_insert_rowid();
        if actor_id == 0 {
            // Store-level anomaly: the insert reported success but assigned no id
            return Err(AppError::WriteFailed(
                "No id assigned for inserted actor".to_string(),
            ));
        }

        Ok(actor_id)
    }

    async fn update_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        id: ActorId,
        actor: &NewActor,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE actor SET name = ?, surname = ? WHERE id = ?")
            .bind(&actor.name)
            .bind(&actor.surname)
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::ActorNotFound(id));
        }

        Ok(())
    }

    async fn delete_in_tx(tx: &mut Transaction<'_, Sqlite>, id: ActorId) -> Result<()> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM actor WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_write_error)?;

        if exists.is_none() {
            return Err(AppError::ActorNotFound(id));
        }

        // Association rows first, then the entity row, same transaction.
        sqlx::query("DELETE FROM movie_actor WHERE actor_id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;

        sqlx::query("DELETE FROM actor WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;

        Ok(())
    }
}

#[async_trait]
impl ActorRepository for SqliteActorRepository {
    async fn list(&self) -> Result<Vec<Actor>> {
        let rows: Vec<ActorRow> =
            sqlx::query_as("SELECT id, name, surname FROM actor ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ActorRow::into_actor).collect())
    }

    async fn find_by_id(&self, id: ActorId) -> Result<Option<Actor>> {
        let row: Option<ActorRow> =
            sqlx::query_as("SELECT id, name, surname FROM actor WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(ActorRow::into_actor))
    }

    async fn movies_of(&self, id: ActorId) -> Result<Vec<MovieSummary>> {
        let rows: Vec<MovieSummaryRow> = sqlx::query_as(
            r#"
            SELECT movie.id, movie.title, movie.director, movie.year, movie.description
            FROM movie
            INNER JOIN movie_actor ON movie_actor.movie_id = movie.id
            WHERE movie_actor.actor_id = ?
            ORDER BY movie.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        // An empty join cannot tell "actor with no movies" from "no actor";
        // probe existence second so the combined answer always matches one
        // committed state even if a concurrent delete lands between the two
        // statements (ids are never reused, so a non-empty join implies the
        // actor existed when those rows were read).
        if rows.is_empty() {
            let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM actor WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

            if exists.is_none() {
                return Err(AppError::ActorNotFound(id));
            }
        }

        Ok(rows.into_iter().map(MovieSummaryRow::into_summary).collect())
    }

    async fn insert(&self, actor: &NewActor) -> Result<ActorId> {
        let _guard = self.write_lock.acquire().await;
        let mut tx = self.pool.begin().await.map_err(map_write_error)?;

        match Self::insert_in_tx(&mut tx, actor).await {
            Ok(id) => {
                tx.commit().await.map_err(map_write_error)?;
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "Actor insert failed");
                rollback(tx, "actor insert").await;
                Err(e)
            }
        }
    }

    async fn update(&self, id: ActorId, actor: &NewActor) -> Result<()> {
        let _guard = self.write_lock.acquire().await;
        let mut tx = self.pool.begin().await.map_err(map_write_error)?;

        match Self::update_in_tx(&mut tx, id, actor).await {
            Ok(()) => {
                tx.commit().await.map_err(map_write_error)?;
                Ok(())
            }
            Err(e) => {
                if !e.is_not_found() {
                    error!(actor_id = id, error = %e, "Actor update failed");
                }
                rollback(tx, "actor update").await;
                Err(e)
            }
        }
    }

    async fn delete(&self, id: ActorId) -> Result<()> {
        let _guard = self.write_lock.acquire().await;
        let mut tx = self.pool.begin().await.map_err(map_write_error)?;

        match Self::delete_in_tx(&mut tx, id).await {
            Ok(()) => {
                tx.commit().await.map_err(map_write_error)?;
                Ok(())
            }
            Err(e) => {
                if !e.is_not_found() {
                    error!(actor_id = id, error = %e, "Actor delete failed");
                }
                rollback(tx, "actor delete").await;
                Err(e)
            }
        }
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct ActorRow {
    id: i64,
    name: String,
    surname: String,
}

impl ActorRow {
    fn into_actor(self) -> Actor {
        Actor {
            id: self.id,
            name: self.name,
            surname: self.surname,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MovieSummaryRow {
    id: i64,
    title: String,
    director: String,
    year: i32,
    description: Option<String>,
}

impl MovieSummaryRow {
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title,
            director: self.director,
            year: self.year,
            description: self.description,
        }
    }
}
