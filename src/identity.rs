use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use thiserror::Error;
use uuid::Uuid;

const USER_ID_FILE: &str = "user_id";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("no data directory available")]
    NoDataDir,
    #[error("identity storage failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of the stable id scores are filed under.
pub trait IdentityProvider: Send + Sync {
    fn user_id(&self) -> String;
}

/// Id generated once and kept in the data directory.
pub struct FileIdentity {
    id: String,
}

impl FileIdentity {
    pub fn open() -> Result<Self, IdentityError> {
        let base_dir = dirs::data_dir()
            .ok_or(IdentityError::NoDataDir)?
            .join("keyrush");
        Self::with_base_dir(&base_dir)
    }

    pub fn with_base_dir(base_dir: &Path) -> Result<Self, IdentityError> {
        fs::create_dir_all(base_dir)?;
        let path = base_dir.join(USER_ID_FILE);
        // Only a missing or blank file gets a fresh id; an unreadable one is
        // left alone so the stored id is never replaced.
        match fs::read_to_string(&path) {
            Ok(content) => {
                let id = content.trim();
                if !id.is_empty() {
                    return Ok(Self { id: id.to_string() });
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(IdentityError::Io(e)),
        }

        let id = Uuid::new_v4().to_string();
        write_atomic(&path, &id)?;
        log::info!("Created new user id in {}", path.display());
        Ok(Self { id })
    }
}

impl IdentityProvider for FileIdentity {
    fn user_id(&self) -> String {
        self.id.clone()
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)
}

/// Fixed id held in memory; never persisted.
pub struct MemoryIdentity {
    id: String,
}

impl MemoryIdentity {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }

    pub fn ephemeral() -> Self {
        Self {
            id: format!("ephemeral_{}", Uuid::new_v4().simple()),
        }
    }
}

impl IdentityProvider for MemoryIdentity {
    fn user_id(&self) -> String {
        self.id.clone()
    }
}

/// Persisted identity when storage works, otherwise a per-run id.
pub fn resolve_identity() -> Box<dyn IdentityProvider> {
    match FileIdentity::open() {
        Ok(identity) => Box::new(identity),
        Err(e) => {
            log::warn!("Falling back to an ephemeral user id: {e}");
            Box::new(MemoryIdentity::ephemeral())
        }
    }
}
