// src/obs/download.rs

//! Mirroring package binaries to a local directory
//!
//! Files land at `<root>/<project>/<repo>/<arch>/<package>/<filename>`. A
//! local file whose size equals the declared remote size counts as already
//! downloaded; anything else is fetched again from byte zero. Size is the
//! only comparison made, so a same-size corrupt file goes unnoticed.

use crate::error::{Error, Result};
use crate::progress::ProgressTracker;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::client::Transport;
use super::metadata::{join_path, BinaryRecord, PackageInfo};
use super::project::ProjectClient;

/// A download that stopped part way through a package
#[derive(thiserror::Error, Debug)]
#[error("{source}")]
pub struct DownloadFailure {
    /// Local paths of the files handled before the failure, in order
    pub completed: Vec<PathBuf>,
    pub source: Error,
}

/// What happened to a single binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Local copy already had the declared size
    AlreadyPresent,
    /// Fetched from the server
    Downloaded,
}

/// Local destination of `binary` for `pkg`
pub fn local_path(root: &Path, project: &str, pkg: &PackageInfo, binary: &BinaryRecord) -> PathBuf {
    let mut path = root.join(project);
    for segment in join_path(&[pkg.path.as_str(), binary.filename.as_str()]).split('/') {
        path.push(segment);
    }
    path
}

/// Number of `results` that ended as `outcome`
pub fn count_outcome(results: &[(PathBuf, FileOutcome)], outcome: FileOutcome) -> usize {
    results.iter().filter(|(_, o)| *o == outcome).count()
}

/// True when `local` must be (re)downloaded to match `declared_size`
fn needs_download(local: &Path, declared_size: u64) -> Result<bool> {
    match fs::metadata(local) {
        Ok(meta) => Ok(meta.len() != declared_size),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(Error::FilesystemError(format!(
            "Failed to inspect {}: {e}",
            local.display()
        ))),
    }
}

/// Create all missing ancestors of `path`, owner-only where supported
fn create_parent_dirs(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(parent).map_err(|e| {
        Error::FilesystemError(format!(
            "Failed to create directory {}: {e}",
            parent.display()
        ))
    })
}

impl<T: Transport> ProjectClient<T> {
    /// Download the binaries of `pkg` that are missing or incomplete under `root`
    ///
    /// Returns the local path of every binary with what was done to it, in the
    /// order of `pkg.files`.
    pub fn download_package_files(
        &self,
        pkg: &PackageInfo,
        root: &Path,
        progress: &dyn ProgressTracker,
    ) -> std::result::Result<Vec<(PathBuf, FileOutcome)>, DownloadFailure> {
        debug!(
            "Downloading package files for {} / {}",
            self.project().name,
            pkg.path
        );
        progress.set_length(pkg.files.len() as u64);

        let mut results = Vec::with_capacity(pkg.files.len());
        for binary in &pkg.files {
            progress.set_message(&binary.filename);
            match self.download_one(pkg, binary, root) {
                Ok(result) => {
                    results.push(result);
                    progress.increment(1);
                }
                Err(source) => {
                    progress.finish_with_error(&source.to_string());
                    let completed = results.into_iter().map(|(path, _)| path).collect();
                    return Err(DownloadFailure { completed, source });
                }
            }
        }

        let fetched = count_outcome(&results, FileOutcome::Downloaded);
        info!(
            "{}: {} fetched, {} already present",
            pkg.path,
            fetched,
            results.len() - fetched
        );
        progress.finish_with_message(&format!("{} done", pkg.path));
        Ok(results)
    }

    /// Fetch one binary unless its local copy already has the declared size
    pub fn download_one(
        &self,
        pkg: &PackageInfo,
        binary: &BinaryRecord,
        root: &Path,
    ) -> Result<(PathBuf, FileOutcome)> {
        let remote = join_path(&[pkg.path.as_str(), binary.filename.as_str()]);
        let local = local_path(root, &self.project().name, pkg, binary);

        if !needs_download(&local, binary.size)? {
            debug!("{} already downloaded", local.display());
            return Ok((local, FileOutcome::AlreadyPresent));
        }

        create_parent_dirs(&local)?;

        let mut dest = File::create(&local).map_err(|e| {
            Error::FilesystemError(format!("Failed to create file {}: {e}", local.display()))
        })?;

        debug!("Downloading {} to {}", remote, local.display());
        let written = self
            .download_binary(&remote, &mut dest)
            .map_err(|e| e.context(format!("could not download binary at {remote}")))?;
        debug!("Wrote {} bytes to {}", written, local.display());

        Ok((local, FileOutcome::Downloaded))
    }
}
