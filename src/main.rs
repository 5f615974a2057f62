// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.global.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let global = &cli.global;
    match cli.command {
        Commands::Repos { project } => commands::cmd_repos(global, &project),
        Commands::Archs { project, repo } => commands::cmd_archs(global, &project, &repo),
        Commands::Packages {
            project,
            repo,
            arch,
        } => commands::cmd_packages(global, &project, &repo, &arch),
        Commands::Binaries {
            project,
            repo,
            arch,
            package,
            all,
        } => commands::cmd_binaries(global, &project, &repo, &arch, &package, all),
        Commands::Find { project, json } => commands::cmd_find(global, &project, json),
        Commands::Download {
            project,
            root,
            repo,
            arch,
        } => commands::cmd_download(
            global,
            &project,
            root,
            repo.as_deref(),
            arch.as_deref(),
        ),
    }
}
