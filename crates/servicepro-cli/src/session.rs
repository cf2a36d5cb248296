//! Signed-in user persisted between CLI invocations.
//!
//! The file holds a single JSON object keyed `serviceCurrentUser`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use servicepro_core::CurrentUser;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "serviceCurrentUser")]
    current_user: Option<CurrentUser>,
}

pub(crate) struct Session {
    path: PathBuf,
}

impl Session {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved user, or `None` when nobody is signed in.
    ///
    /// A missing file means signed out. A corrupt file is an error.
    pub(crate) fn load(&self) -> anyhow::Result<Option<CurrentUser>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read session {}", self.path.display()))
            }
        };
        let file: SessionFile = serde_json::from_str(&raw)
            .with_context(|| format!("session file {} is not valid JSON", self.path.display()))?;
        Ok(file.current_user)
    }

    pub(crate) fn save(&self, user: &CurrentUser) -> anyhow::Result<()> {
        let body = serde_json::to_string_pretty(&SessionFile {
            current_user: Some(user.clone()),
        })?;
        std::fs::write(&self.path, body)
            .with_context(|| format!("failed to write session {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), user = %user.username, "session saved");
        Ok(())
    }

    /// Removes the session file. Clearing an absent session is not an error.
    pub(crate) fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("failed to remove session {}", self.path.display())),
        }
    }
}
