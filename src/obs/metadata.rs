// src/obs/metadata.rs

//! Project and package data structures
//!
//! Types describing what lives under a build-service project: the project
//! itself, the packages discovered in it, and the binaries each package
//! publishes.

use serde::Serialize;
use std::fmt;

/// A named remote project plus the credentials used for every request
#[derive(Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            user: user.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Metadata for one published binary, as returned by a binary listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryRecord {
    pub filename: String,
    /// Declared size in bytes
    pub size: u64,
    /// Modification time exactly as the server sent it
    pub mtime: String,
}

/// One package under a specific repository and architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: String,
    /// Remote path, always `repo/arch/name`
    pub path: String,
    pub repo: String,
    pub arch: String,
    /// Binaries matching `arch`, in listing order
    pub files: Vec<BinaryRecord>,
}

impl PackageInfo {
    /// Create an empty package entry; `path` is composed from the triple
    pub fn new(
        repo: impl Into<String>,
        arch: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let repo = repo.into();
        let arch = arch.into();
        let name = name.into();
        let path = join_path(&[repo.as_str(), arch.as_str(), name.as_str()]);
        Self {
            name,
            path,
            repo,
            arch,
            files: Vec::new(),
        }
    }

    /// Sum of declared sizes of all matched binaries
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Join remote path segments with `/`, skipping empty ones
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .flat_map(|s| s.split('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
