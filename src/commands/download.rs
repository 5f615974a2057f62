// src/commands/download.rs

//! Mirror command: discovery followed by per-package download

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use obs_mirror::obs::count_outcome;
use obs_mirror::{FileOutcome, PackageInfo};
use std::path::PathBuf;
use tracing::{info, warn};

use super::open_project;
use super::progress::tracker;

/// Download every matching binary of `project` below the mirror root
pub fn cmd_download(
    global: &GlobalArgs,
    project: &str,
    root: Option<PathBuf>,
    repo: Option<&str>,
    arch: Option<&str>,
) -> Result<()> {
    let (client, settings) = open_project(global, project)?;
    let root = root.unwrap_or_else(|| settings.mirror_root());
    info!("Mirroring {} into {}", project, root.display());

    let discovery = tracker("Discovering", global.quiet);
    let catalog = client
        .find_all_packages(discovery.as_ref())
        .with_context(|| format!("Failed to discover packages of {project}"))?;

    let selected = select_packages(catalog, repo, arch);
    if selected.is_empty() {
        warn!("No packages selected in {}", project);
        println!("Nothing to download");
        return Ok(());
    }

    let total_bytes: u64 = selected.iter().map(PackageInfo::total_size).sum();
    info!("{} packages selected, {} bytes declared", selected.len(), total_bytes);

    let mut fetched = 0;
    let mut present = 0;
    for pkg in &selected {
        let progress = tracker(&pkg.path, global.quiet);
        match client.download_package_files(pkg, &root, progress.as_ref()) {
            Ok(results) => {
                fetched += count_outcome(&results, FileOutcome::Downloaded);
                present += count_outcome(&results, FileOutcome::AlreadyPresent);
            }
            Err(failure) => {
                eprintln!(
                    "{} files of {} were in place before the failure",
                    failure.completed.len(),
                    pkg.path
                );
                return Err(failure.source)
                    .with_context(|| format!("Failed to download package {}", pkg.path));
            }
        }
    }

    println!(
        "Mirrored {} packages into {}: {} fetched, {} already present",
        selected.len(),
        root.join(project).display(),
        fetched,
        present
    );
    Ok(())
}

/// Narrow the catalog to one repo and/or arch, keeping its order
fn select_packages(
    catalog: Vec<PackageInfo>,
    repo: Option<&str>,
    arch: Option<&str>,
) -> Vec<PackageInfo> {
    catalog
        .into_iter()
        .filter(|pkg| repo.is_none_or(|r| pkg.repo == r))
        .filter(|pkg| arch.is_none_or(|a| pkg.arch == a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<PackageInfo> {
        vec![
            PackageInfo::new("15.3", "x86_64", "foo"),
            PackageInfo::new("15.3", "aarch64", "foo"),
            PackageInfo::new("15.4", "x86_64", "foo"),
            PackageInfo::new("15.4", "x86_64", "bar"),
        ]
    }

    #[test]
    fn test_select_everything() {
        assert_eq!(select_packages(catalog(), None, None).len(), 4);
    }

    #[test]
    fn test_select_by_repo_and_arch() {
        let selected = select_packages(catalog(), Some("15.4"), Some("x86_64"));
        let paths: Vec<_> = selected.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["15.4/x86_64/foo", "15.4/x86_64/bar"]);
    }

    #[test]
    fn test_select_by_arch_only() {
        let selected = select_packages(catalog(), None, Some("aarch64"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].path, "15.3/aarch64/foo");
    }
}
