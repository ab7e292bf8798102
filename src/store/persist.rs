//! Persistence adapter
//!
//! A whitelisted subset of slices (theme, location picker, auth, cart) is
//! serialized as JSON under a versioned root key and rehydrated at startup.
//! Anything that fails to load (missing document, version mismatch, corrupt
//! JSON) falls back to defaults with a warning; startup never fails on
//! persistence.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    cart::CartState,
    store::{AppState, auth::AuthState, ride::LocationState, theme::Theme},
};

/// Current persistence schema version. Bumped on any incompatible change to
/// the persisted shape; older documents are discarded, not migrated.
pub const PERSIST_VERSION: u32 = 1;

/// Errors raised while saving state.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be serialized or deserialized.
    #[error("persistence document error: {0}")]
    Document(#[from] serde_json::Error),
}

/// Device storage for the persisted document.
pub trait Storage {
    /// Loads the raw document, or `None` if nothing was persisted yet.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] on storage failure.
    fn load(&self) -> Result<Option<String>, PersistError>;

    /// Saves the raw document, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] on storage failure.
    fn save(&self, document: &str) -> Result<(), PersistError>;
}

/// File-backed [`Storage`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(Some(document)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, document: &str) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(fs::write(&self.path, document)?)
    }
}

/// The persisted whitelist. Everything else is rebuilt from defaults and
/// server data on the next launch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct PersistedSlices {
    theme: Theme,
    location: LocationState,
    auth: AuthState,
    cart: CartState,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedDocument {
    version: u32,
    slices: PersistedSlices,
}

/// Serializes the whitelisted slices of the given state.
///
/// # Errors
///
/// Returns a [`PersistError`] if serialization or the storage write fails.
pub fn persist(state: &AppState, storage: &dyn Storage) -> Result<(), PersistError> {
    let document = PersistedDocument {
        version: PERSIST_VERSION,
        slices: PersistedSlices {
            theme: state.theme,
            location: state.location.clone(),
            auth: state.auth.clone(),
            cart: state.cart.clone(),
        },
    };

    storage.save(&serde_json::to_string(&document)?)
}

/// Builds the startup state: persisted slices where a usable document
/// exists, defaults everywhere else.
pub fn rehydrate(storage: &dyn Storage) -> AppState {
    let slices = match load_slices(storage) {
        Ok(Some(slices)) => slices,
        Ok(None) => PersistedSlices::default(),
        Err(err) => {
            warn!(%err, "persisted state unreadable; starting from defaults");
            PersistedSlices::default()
        }
    };

    AppState {
        theme: slices.theme,
        location: slices.location,
        auth: slices.auth,
        cart: slices.cart,
        ..AppState::default()
    }
}

fn load_slices(storage: &dyn Storage) -> Result<Option<PersistedSlices>, PersistError> {
    let Some(raw) = storage.load()? else {
        return Ok(None);
    };

    let document: PersistedDocument = serde_json::from_str(&raw)?;

    if document.version != PERSIST_VERSION {
        warn!(
            found = document.version,
            expected = PERSIST_VERSION,
            "persisted state version mismatch; discarding"
        );
        return Ok(None);
    }

    Ok(Some(document.slices))
}
