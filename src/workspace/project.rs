//! Project identity and target-file snapshots

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// The `(user, project)` pair a pass writes into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRef {
    user: String,
    name: String,
}

impl ProjectRef {
    /// Create a project reference; both parts must be single directory names.
    pub fn new(user: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let user = user.into();
        let name = name.into();
        validate_component("user", &user)?;
        validate_component("project", &name)?;
        Ok(Self { user, name })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<root>/<user>/<project>`
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(&self.user).join(&self.name)
    }

    /// Resolve an artifact filename inside the project directory.
    ///
    /// Absolute paths and `..` components are rejected.
    pub fn resolve(&self, root: &Path, filename: &str) -> Result<PathBuf> {
        let relative = Path::new(filename);
        let safe = !filename.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            return Err(Error::UnsafePath(filename.to_string()));
        }
        Ok(self.dir(root).join(relative))
    }
}

fn validate_component(label: &str, value: &str) -> Result<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(|c: char| c == '/' || c == '\\');
    if invalid {
        return Err(Error::InvalidProject(format!("{} name '{}'", label, value)));
    }
    Ok(())
}

/// Read-only snapshot of a target file taken at decision time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    pub path: PathBuf,
    /// Raw bytes on disk; `None` when the file does not exist yet
    pub existing: Option<Vec<u8>>,
}

impl TargetFile {
    /// Snapshot `path`; a missing file is not an error.
    pub fn snapshot(path: PathBuf, filename: &str) -> Result<Self> {
        let existing = match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(Error::io(filename, e)),
        };
        Ok(Self { path, existing })
    }

    pub fn exists(&self) -> bool {
        self.existing.is_some()
    }

    /// Existing content as text; `None` when missing or not valid UTF-8.
    pub fn existing_text(&self) -> Option<&str> {
        std::str::from_utf8(self.existing.as_deref()?).ok()
    }

    /// Whether `content` matches the bytes already on disk
    pub fn is_unchanged(&self, content: &str) -> bool {
        self.existing.as_deref() == Some(content.as_bytes())
    }
}
