// src/commands/list.rs

//! Listing commands: one remote listing each

use crate::cli::GlobalArgs;
use anyhow::Result;
use obs_mirror::ArchFilter;
use tracing::info;

use super::open_project;

/// List repositories of a project
pub fn cmd_repos(global: &GlobalArgs, project: &str) -> Result<()> {
    info!("Listing repositories of {}", project);
    let (client, _) = open_project(global, project)?;
    print_names(&client.list_repos()?, "No repositories");
    Ok(())
}

/// List architectures of a repository
pub fn cmd_archs(global: &GlobalArgs, project: &str, repo: &str) -> Result<()> {
    info!("Listing architectures of {}/{}", project, repo);
    let (client, _) = open_project(global, project)?;
    print_names(&client.list_archs(repo)?, "No architectures");
    Ok(())
}

/// List packages of a repository/architecture
pub fn cmd_packages(global: &GlobalArgs, project: &str, repo: &str, arch: &str) -> Result<()> {
    info!("Listing packages of {}/{}/{}", project, repo, arch);
    let (client, _) = open_project(global, project)?;
    print_names(&client.list_packages(repo, arch)?, "No packages");
    Ok(())
}

/// List binaries of one package, matching its architecture unless `all`
pub fn cmd_binaries(
    global: &GlobalArgs,
    project: &str,
    repo: &str,
    arch: &str,
    package: &str,
    all: bool,
) -> Result<()> {
    let (client, _) = open_project(global, project)?;
    let path = obs_mirror::obs::join_path(&[repo, arch, package]);
    info!("Listing binaries of {}/{}", project, path);

    let filter = ArchFilter::new(arch);
    let binaries: Vec<_> = client
        .list_binaries(&path)?
        .into_iter()
        .filter(|b| all || filter.matches(&b.filename))
        .collect();

    if binaries.is_empty() {
        println!("No binaries");
        return Ok(());
    }
    for binary in binaries {
        println!("{:>12}  {:>12}  {}", binary.size, binary.mtime, binary.filename);
    }
    Ok(())
}

fn print_names(names: &[String], empty: &str) {
    if names.is_empty() {
        println!("{empty}");
    }
    for name in names {
        println!("{name}");
    }
}
