// src/obs/discovery.rs

//! Package discovery
//!
//! Walks `repo -> arch -> package` under a project and collects, for every
//! package, the binaries that match its architecture. The resulting catalog
//! is ordered repo-major, then arch, then package, exactly as the server
//! lists each level.

use crate::error::Result;
use crate::progress::ProgressTracker;
use tracing::{debug, info};

use super::client::Transport;
use super::filter::ArchFilter;
use super::metadata::{join_path, PackageInfo};
use super::project::ProjectClient;

impl<T: Transport> ProjectClient<T> {
    /// Fill `pkg.files` with the binaries published for it that match its arch
    ///
    /// Also (re)computes `pkg.path` from the repo/arch/name triple.
    pub fn package_binaries(&self, pkg: &mut PackageInfo) -> Result<()> {
        pkg.path = join_path(&[pkg.repo.as_str(), pkg.arch.as_str(), pkg.name.as_str()]);
        debug!("Retrieving binaries for {}", pkg.path);

        let all = self.list_binaries(&pkg.path).map_err(|e| {
            e.context(format!("failed to list binaries of package {}", pkg.name))
        })?;

        let filter = ArchFilter::new(pkg.arch.as_str());
        let before = pkg.files.len();
        pkg.files
            .extend(all.into_iter().filter(|b| filter.matches(&b.filename)));

        debug!(
            "{}: {} of the published binaries match {}",
            pkg.path,
            pkg.files.len() - before,
            pkg.arch
        );
        Ok(())
    }

    /// Discover every package of the project with its matching binaries
    ///
    /// The first failure aborts the walk; nothing discovered so far is
    /// returned. The progress total is estimated from the first
    /// repo/arch pair (repos x archs x packages) and is only exact when every
    /// repo/arch has the same shape.
    pub fn find_all_packages(&self, progress: &dyn ProgressTracker) -> Result<Vec<PackageInfo>> {
        let result = self.walk_packages(progress);
        match &result {
            Ok(catalog) => progress.finish_with_message(&format!(
                "found {} packages in {}",
                catalog.len(),
                self.project().name
            )),
            Err(e) => progress.finish_with_error(&e.to_string()),
        }
        result
    }

    fn walk_packages(&self, progress: &dyn ProgressTracker) -> Result<Vec<PackageInfo>> {
        let project = &self.project().name;
        info!("Finding all package files in project {}", project);

        let mut catalog = Vec::new();
        let mut total_known = false;

        let repos = self
            .list_repos()
            .map_err(|e| e.context(format!("failed to list repos of project {project}")))?;

        for repo in &repos {
            let archs = self.list_archs(repo).map_err(|e| {
                e.context(format!("failed to list archs of {repo} in project {project}"))
            })?;

            for arch in &archs {
                let packages = self.list_packages(repo, arch).map_err(|e| {
                    e.context(format!(
                        "failed to list packages of {repo}/{arch} in project {project}"
                    ))
                })?;

                for name in &packages {
                    if !total_known {
                        progress.set_length((repos.len() * archs.len() * packages.len()) as u64);
                        total_known = true;
                    }

                    let mut pkg = PackageInfo::new(repo.as_str(), arch.as_str(), name.as_str());
                    progress.set_message(&pkg.path);
                    self.package_binaries(&mut pkg)?;
                    progress.increment(1);

                    catalog.push(pkg);
                }
            }
        }

        info!("Found {} packages in project {}", catalog.len(), project);
        Ok(catalog)
    }
}
