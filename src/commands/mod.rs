// src/commands/mod.rs

//! Command handlers for the obs-mirror CLI

mod download;
mod find;
mod list;
mod progress;

pub use download::cmd_download;
pub use find::cmd_find;
pub use list::{cmd_archs, cmd_binaries, cmd_packages, cmd_repos};

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use obs_mirror::{HttpTransport, Project, ProjectClient, Settings};
use tracing::debug;

/// Settings file merged with command-line overrides
pub fn resolve_settings(global: &GlobalArgs) -> Result<Settings> {
    let mut settings = Settings::discover(global.config.as_deref())?;

    if let Some(url) = &global.api_url {
        settings.api.url = url.clone();
    }
    if let Some(timeout) = global.timeout {
        settings.api.timeout_secs = Some(timeout);
    }
    if let Some(user) = &global.user {
        settings.auth.user = Some(user.clone());
    }
    if let Some(password) = &global.password {
        settings.auth.password = Some(password.clone());
    }

    settings
        .validate()
        .context("Invalid command-line settings")?;
    Ok(settings)
}

/// HTTP-backed client for `project`
pub fn open_project(
    global: &GlobalArgs,
    project: &str,
) -> Result<(ProjectClient<HttpTransport>, Settings)> {
    let settings = resolve_settings(global)?;
    let project = Project::new(
        project,
        settings.auth.user.clone().unwrap_or_default(),
        settings.auth.password.clone().unwrap_or_default(),
    );
    debug!("Using {:?} at {}", project, settings.api.url);

    let transport = HttpTransport::new(settings.client_config())?;
    Ok((ProjectClient::new(project, transport), settings))
}
