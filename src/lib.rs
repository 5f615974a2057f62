// src/lib.rs

//! obs-mirror
//!
//! Mirrors the binary packages a build-service project publishes into a
//! local directory tree.
//!
//! # Architecture
//!
//! - `obs`: listing, architecture filtering, discovery and download
//! - `progress`: observers for long-running operations
//! - `config`: file and flag based settings for the HTTP client
//!
//! Everything runs sequentially on the calling thread.

pub mod config;
mod error;
pub mod obs;
pub mod progress;

pub use config::Settings;
pub use error::{Error, Result};
pub use obs::{
    ArchFilter, BinaryRecord, ClientConfig, DownloadFailure, FileOutcome, HttpTransport,
    PackageInfo, Project, ProjectClient, Transport,
};
pub use progress::{CallbackProgress, LogProgress, ProgressEvent, ProgressTracker, SilentProgress};
