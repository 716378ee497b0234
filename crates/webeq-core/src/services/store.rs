//! Identity and export storage backends
//!
//! User ids are opaque to the editor. The file store lays them out as one
//! directory per user:
//!
//! ```text
//! <root>/
//! └── 3f2a...e91c/            (32 lowercase hex chars)
//!     ├── 20261018-150405123.txt
//!     └── latest.txt
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rand::Rng;

use crate::error::{StoreError, StoreResult};

/// Length of a generated user id
pub const USER_ID_LEN: usize = 32;

/// File name that always holds a user's most recent export
pub const LATEST_EXPORT_FILE: &str = "latest.txt";

/// Storage used by the store service thread
pub trait StoreBackend: Send + 'static {
    /// Create and register a fresh user id
    fn allocate_user_id(&mut self) -> StoreResult<String>;

    fn user_exists(&self, user_id: &str) -> StoreResult<bool>;

    /// Persist an export for a known user
    fn save_export(&mut self, user_id: &str, text: &str) -> StoreResult<()>;
}

/// Random 128-bit id as 32 lowercase hex chars
pub fn generate_user_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:032x}", rng.random::<u128>())
}

/// Whether a string has the shape of a generated id
pub fn is_valid_user_id(user_id: &str) -> bool {
    user_id.len() == USER_ID_LEN
        && user_id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Ephemeral store; clones share the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<HashMap<String, Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exports saved for a user, oldest first
    pub fn exports(&self, user_id: &str) -> Vec<String> {
        self.users
            .lock()
            .map(|users| users.get(user_id).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Register an id directly, bypassing allocation
    pub fn insert_user(&self, user_id: &str) {
        if let Ok(mut users) = self.users.lock() {
            users.entry(user_id.to_string()).or_default();
        }
    }
}

impl StoreBackend for MemoryStore {
    fn allocate_user_id(&mut self) -> StoreResult<String> {
        let mut rng = rand::rng();
        let mut users = self.users.lock().map_err(|_| StoreError::ServiceStopped)?;
        let mut user_id = generate_user_id(&mut rng);
        while users.contains_key(&user_id) {
            user_id = generate_user_id(&mut rng);
        }
        users.insert(user_id.clone(), Vec::new());
        Ok(user_id)
    }

    fn user_exists(&self, user_id: &str) -> StoreResult<bool> {
        let users = self.users.lock().map_err(|_| StoreError::ServiceStopped)?;
        Ok(users.contains_key(user_id))
    }

    fn save_export(&mut self, user_id: &str, text: &str) -> StoreResult<()> {
        let mut users = self.users.lock().map_err(|_| StoreError::ServiceStopped)?;
        let exports = users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?;
        exports.push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Filesystem backend
// ============================================================================

/// Directory-per-user store under a root folder
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        log::info!("FileStore: opened {:?}", root);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a user; `None` for ids that are not generated ids
    pub fn user_dir(&self, user_id: &str) -> Option<PathBuf> {
        is_valid_user_id(user_id).then(|| self.root.join(user_id))
    }

    /// Path of a user's most recent export
    pub fn latest_export_path(&self, user_id: &str) -> Option<PathBuf> {
        self.user_dir(user_id).map(|dir| dir.join(LATEST_EXPORT_FILE))
    }
}

fn write_file(path: &Path, text: &str) -> StoreResult<()> {
    fs::write(path, text).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl StoreBackend for FileStore {
    fn allocate_user_id(&mut self) -> StoreResult<String> {
        let mut rng = rand::rng();
        loop {
            let user_id = generate_user_id(&mut rng);
            let dir = self.root.join(&user_id);
            if dir.exists() {
                continue;
            }
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
            log::info!("FileStore: allocated user {}", user_id);
            return Ok(user_id);
        }
    }

    fn user_exists(&self, user_id: &str) -> StoreResult<bool> {
        Ok(self.user_dir(user_id).is_some_and(|dir| dir.is_dir()))
    }

    fn save_export(&mut self, user_id: &str, text: &str) -> StoreResult<()> {
        let dir = self
            .user_dir(user_id)
            .filter(|dir| dir.is_dir())
            .ok_or_else(|| StoreError::UnknownUser(user_id.to_string()))?;

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%3f");
        let path = dir.join(format!("{}.txt", stamp));
        write_file(&path, text)?;
        write_file(&dir.join(LATEST_EXPORT_FILE), text)?;
        log::info!("FileStore: saved export {:?}", path);
        Ok(())
    }
}
