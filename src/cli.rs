// src/cli.rs

//! CLI definitions for obs-mirror
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "obs-mirror")]
#[command(version)]
#[command(about = "Mirror binary packages published by a build-service project", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file (default: ~/.config/obs-mirror/config.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Build-service API endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Account name for HTTP Basic authentication
    #[arg(short, long, global = true, env = "OBS_USER")]
    pub user: Option<String>,

    /// Password for HTTP Basic authentication
    #[arg(short, long, global = true, env = "OBS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the repositories of a project
    Repos {
        /// Project name (e.g. home:alice)
        project: String,
    },

    /// List the architectures built for a repository
    Archs {
        project: String,
        repo: String,
    },

    /// List the packages built for a repository and architecture
    Packages {
        project: String,
        repo: String,
        arch: String,
    },

    /// List the binaries published for one package
    Binaries {
        project: String,
        repo: String,
        arch: String,
        package: String,

        /// Show every binary, not only those matching the architecture
        #[arg(long)]
        all: bool,
    },

    /// Discover every package of a project and its matching binaries
    Find {
        project: String,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Discover and download every matching binary of a project
    Download {
        project: String,

        /// Local mirror root (files go to <root>/<project>/<repo>/<arch>/<package>/)
        #[arg(short, long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Only download packages of this repository
        #[arg(long)]
        repo: Option<String>,

        /// Only download packages of this architecture
        #[arg(long)]
        arch: Option<String>,
    },
}
