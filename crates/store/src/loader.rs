//! Bulk ingestion of the catalog and user CSV files.
//!
//! Two tabular sources feed a repository at startup: the game catalog
//! (`games.csv`, original Steam export headers) and the user list
//! (`users.csv`, plaintext passwords that are hashed on the way in).
//!
//! Malformed rows are skipped individually with a `warn` diagnostic - a bad
//! row never aborts the load. Only file-level problems (missing file,
//! unreadable data) and repository failures surface as [`LoaderError`]s.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use gamelib_core::{GameId, Price, Username};

use crate::auth;
use crate::models::{Game, Genre, Platforms, Publisher, User};
use crate::repository::{Repository, RepositoryError};

/// Catalog file name expected inside the data directory.
pub const GAMES_FILE: &str = "games.csv";
/// User file name expected inside the data directory.
pub const USERS_FILE: &str = "users.csv";

/// Errors that can occur during a bulk load.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The source file is missing or unreadable.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path of the offending file.
        path: String,
        /// Underlying csv/io error.
        #[source]
        source: csv::Error,
    },

    /// The target repository rejected a write.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Parsed catalog data: games plus the genre and publisher value sets
/// deduplicated across the whole file.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Well-formed games in file order.
    pub games: Vec<Game>,
    /// Every genre mentioned by any game.
    pub genres: BTreeSet<Genre>,
    /// Every publisher mentioned by any game.
    pub publishers: BTreeSet<Publisher>,
}

/// One row of the game catalog export.
#[derive(Debug, Deserialize)]
struct GameRecord {
    #[serde(rename = "AppID")]
    app_id: i64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Release date")]
    release_date: String,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "About the game")]
    description: String,
    #[serde(rename = "Header image")]
    image_url: String,
    #[serde(rename = "Website", default)]
    website: Option<String>,
    #[serde(rename = "Windows")]
    windows: String,
    #[serde(rename = "Mac")]
    mac: String,
    #[serde(rename = "Linux")]
    linux: String,
    #[serde(rename = "Publishers")]
    publishers: String,
    #[serde(rename = "Genres")]
    genres: String,
}

/// One row of the user list.
#[derive(Debug, Deserialize)]
struct UserRecord {
    username: String,
    password: String,
}

fn none_if_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

fn read_error(path: &Path, source: csv::Error) -> LoaderError {
    LoaderError::Read {
        path: path.display().to_string(),
        source,
    }
}

/// Read and parse the game catalog.
///
/// Rows that fail to parse (missing column, bad number, negative price,
/// blank title) are logged and skipped.
///
/// # Errors
///
/// Returns [`LoaderError::Read`] if the file cannot be opened or read.
pub fn read_game_catalog(path: &Path) -> Result<Catalog, LoaderError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(path, e))?;
    let mut catalog = Catalog::default();

    for (index, record) in reader.deserialize::<GameRecord>().enumerate() {
        // Header occupies line 1.
        let line = index + 2;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping malformed catalog row");
                continue;
            }
        };

        let price = match Price::new(record.price) {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping catalog row with invalid price");
                continue;
            }
        };

        if record.name.trim().is_empty() {
            tracing::warn!(line, "skipping catalog row with blank title");
            continue;
        }

        let mut game = Game::new(GameId::new(record.app_id), record.name.trim());
        game.price = price;
        game.release_date = record.release_date;
        game.description = none_if_empty(record.description);
        game.image_url = none_if_empty(record.image_url);
        game.website_url = record.website.and_then(none_if_empty);
        game.platforms = Platforms {
            windows: record.windows == "TRUE",
            mac: record.mac == "TRUE",
            linux: record.linux == "TRUE",
        };

        if let Some(name) = none_if_empty(record.publishers) {
            let publisher = Publisher::new(name);
            catalog.publishers.insert(publisher.clone());
            game.publisher = Some(publisher);
        }

        for name in record.genres.split(',') {
            let genre = Genre::new(name);
            if genre.name().is_empty() {
                continue;
            }
            catalog.genres.insert(genre.clone());
            game.add_genre(genre);
        }

        catalog.games.push(game);
    }

    Ok(catalog)
}

/// Read and parse the user list, hashing each password.
///
/// Rows with an unparseable username are logged and skipped. Raw passwords
/// never leave this function.
///
/// # Errors
///
/// Returns [`LoaderError::Read`] if the file cannot be opened or read.
pub fn read_users(path: &Path) -> Result<Vec<User>, LoaderError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(path, e))?;
    let mut users = Vec::new();

    for (index, record) in reader.deserialize::<UserRecord>().enumerate() {
        let line = index + 2;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping malformed user row");
                continue;
            }
        };

        let username = match Username::parse(&record.username) {
            Ok(username) => username,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping user row with invalid username");
                continue;
            }
        };

        let password_hash = match auth::hash_password(&record.password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping user row that failed hashing");
                continue;
            }
        };

        users.push(User::new(username, password_hash));
    }

    Ok(users)
}

/// Load `games.csv` and `users.csv` from `data_path` into `repo`.
///
/// # Errors
///
/// Returns [`LoaderError::Read`] if a source file cannot be read and
/// [`LoaderError::Repository`] if the repository rejects a write.
pub async fn populate(data_path: &Path, repo: &dyn Repository) -> Result<(), LoaderError> {
    let catalog = read_game_catalog(&data_path.join(GAMES_FILE))?;
    tracing::info!(
        games = catalog.games.len(),
        genres = catalog.genres.len(),
        publishers = catalog.publishers.len(),
        "loaded game catalog"
    );

    for game in catalog.games {
        repo.add_game(game).await?;
    }
    for genre in catalog.genres {
        repo.add_genre(genre).await?;
    }
    for publisher in catalog.publishers {
        repo.add_publisher(publisher).await?;
    }

    let users = read_users(&data_path.join(USERS_FILE))?;
    tracing::info!(users = users.len(), "loaded users");

    for user in users {
        repo.add_user(user).await?;
    }

    Ok(())
}
