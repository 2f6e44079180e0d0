// Row-to-Graph Reconstructor
//
// Turns the flat output of `movie LEFT JOIN movie_actor LEFT JOIN actor`
// into nested Movie values. Pure transformation: the adapter decodes rows
// into `MovieActorRow` at its boundary and everything after that is
// deterministic and testable without a live store.

use crate::domain::{Actor, Movie, MovieId};
use std::collections::HashMap;

/// One flat row of the movie/actor join. The actor columns are NULL when the
/// movie has no association rows; the LEFT JOIN still yields one row per
/// movie in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieActorRow {
    pub movie_id: MovieId,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub description: Option<String>,
    pub actor_id: Option<i64>,
    pub actor_name: Option<String>,
    pub actor_surname: Option<String>,
}

impl MovieActorRow {
    fn take_actor(&mut self) -> Option<Actor> {
        // All three actor columns are NULL together or present together;
        // a row missing the id carries no actor.
        let id = self.actor_id?;
        Some(Actor {
            id,
            name: self.actor_name.take().unwrap_or_default(),
            surname: self.actor_surname.take().unwrap_or_default(),
        })
    }
}

/// Group join rows into one `Movie` per distinct movie id, preserving
/// first-seen movie order and per-movie row order of actors.
pub fn assemble_movies(rows: Vec<MovieActorRow>) -> Vec<Movie> {
    let mut movies: Vec<Movie> = Vec::new();
    let mut index_of: HashMap<MovieId, usize> = HashMap::new();

    for mut row in rows {
        let idx = match index_of.get(&row.movie_id) {
            Some(&idx) => idx,
            None => {
                index_of.insert(row.movie_id, movies.len());
                movies.push(Movie {
                    id: row.movie_id,
                    title: std::mem::take(&mut row.title),
                    director: std::mem::take(&mut row.director),
                    year: row.year,
                    description: row.description.take(),
                    actors: Vec::new(),
                });
                movies.len() - 1
            }
        };

        if let Some(actor) = row.take_actor() {
            movies[idx].actors.push(actor);
        }
    }

    movies
}
