// src/commands/find.rs

//! Package discovery command

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};

use super::open_project;
use super::progress::tracker;

/// Discover and print every package of `project` with its matching binaries
pub fn cmd_find(global: &GlobalArgs, project: &str, json: bool) -> Result<()> {
    let (client, _) = open_project(global, project)?;
    let progress = tracker("Discovering", global.quiet || json);
    let catalog = client
        .find_all_packages(progress.as_ref())
        .with_context(|| format!("Failed to discover packages of {project}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let mut files = 0;
    for pkg in &catalog {
        println!(
            "{} ({} files, {} bytes)",
            pkg.path,
            pkg.files.len(),
            pkg.total_size()
        );
        for binary in &pkg.files {
            println!("    {} ({} bytes)", binary.filename, binary.size);
        }
        files += pkg.files.len();
    }
    println!("{} packages, {} files", catalog.len(), files);
    Ok(())
}
