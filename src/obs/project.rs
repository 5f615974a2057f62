// src/obs/project.rs

//! Project-scoped access to the build service
//!
//! [`ProjectClient`] binds a [`Project`] to a [`Transport`] and provides the
//! three primitive remote operations: listing directories, listing binaries
//! and fetching one binary. Discovery and download build on these.

use crate::error::{Error, Result};
use std::io::{self, Read, Write};
use tracing::debug;

use super::client::Transport;
use super::listing::{parse_binary_list, parse_directory};
use super::metadata::{join_path, BinaryRecord, Project};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Client for everything published under one project
pub struct ProjectClient<T: Transport> {
    project: Project,
    transport: T,
}

impl<T: Transport> ProjectClient<T> {
    pub fn new(project: Project, transport: T) -> Self {
        Self { project, transport }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Child directory names at `path` (empty path is the project root)
    pub fn list_directories(&self, path: &str) -> Result<Vec<String>> {
        let body = self.fetch_listing(path)?;
        parse_directory(&body).map_err(|e| e.context(self.describe(path)))
    }

    /// Every binary published at a package path, unfiltered
    pub fn list_binaries(&self, path: &str) -> Result<Vec<BinaryRecord>> {
        let body = self.fetch_listing(path)?;
        parse_binary_list(&body).map_err(|e| e.context(self.describe(path)))
    }

    /// Stream the binary at `path` into `dest`, returning the byte count
    pub fn download_binary<W: Write + ?Sized>(&self, path: &str, dest: &mut W) -> Result<u64> {
        let mut body = self
            .transport
            .get(&self.project, path)
            .map_err(|e| e.context(self.describe(path)))?;

        let mut buf = vec![0u8; COPY_BUFFER_SIZE];
        let mut written = 0u64;
        loop {
            let n = match body.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(Error::TransportError(format!(
                        "Response for {} broke off after {written} bytes: {e}",
                        self.describe(path)
                    )));
                }
            };
            dest.write_all(&buf[..n]).map_err(|e| {
                Error::IoError(format!("Failed to store {}: {e}", self.describe(path)))
            })?;
            written += n as u64;
        }
        Ok(written)
    }

    /// Repositories configured for the project
    pub fn list_repos(&self) -> Result<Vec<String>> {
        self.list_directories("")
    }

    /// Architectures built for `repo`
    pub fn list_archs(&self, repo: &str) -> Result<Vec<String>> {
        self.list_directories(repo)
    }

    /// Packages built for `repo`/`arch`
    pub fn list_packages(&self, repo: &str, arch: &str) -> Result<Vec<String>> {
        self.list_directories(&join_path(&[repo, arch]))
    }

    /// GET `path` and read the whole body; the response is released on return
    fn fetch_listing(&self, path: &str) -> Result<String> {
        debug!(project = %self.project.name, path, "listing");
        let mut body = self
            .transport
            .get(&self.project, path)
            .map_err(|e| e.context(self.describe(path)))?;

        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes).map_err(|e| {
            Error::TransportError(format!("Failed to read response for {}: {e}", self.describe(path)))
        })?;
        String::from_utf8(bytes).map_err(|e| {
            Error::ParseError(format!("Response for {} is not UTF-8: {e}", self.describe(path)))
        })
    }

    fn describe(&self, path: &str) -> String {
        if path.is_empty() {
            format!("project {}", self.project.name)
        } else {
            format!("project {} path {}", self.project.name, path)
        }
    }
}
