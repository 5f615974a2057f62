// src/obs/mod.rs

//! Build-service access: listing, discovery and mirroring
//!
//! This module provides functionality for:
//! - Listing repositories, architectures, packages and binaries of a project
//! - Selecting the binaries that belong to a package's architecture
//! - Discovering every package of a project in repo/arch/package order
//! - Downloading binaries into a local mirror, skipping complete files

mod client;
mod discovery;
mod download;
mod filter;
mod listing;
mod metadata;
mod project;

pub use client::{ClientConfig, HttpTransport, Transport, DEFAULT_API_URL};
pub use download::{count_outcome, local_path, DownloadFailure, FileOutcome};
pub use filter::ArchFilter;
pub use listing::{parse_binary_list, parse_directory};
pub use metadata::{join_path, BinaryRecord, PackageInfo, Project};
pub use project::ProjectClient;
