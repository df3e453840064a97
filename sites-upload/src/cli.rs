//! This module implements the CLI interface for sites-upload: argument parsing,
//! credential selection and the async [`run`] entrypoint shared by `main` and the
//! integration tests.
//!
//! All upload mechanics (directory walking, per-file transfer, reporting) live in
//! [`sites-upload-core`]. This module only wires flags, config and transport together.
//!
//! ## Flow
//! parse → resolve credentials → load service config → build transport →
//! site handle (`docs/atlas`) → file manager → one `upload` call.
//!
//! [`sites-upload-core`]: ../../sites_upload_core/

use crate::load_config::load_config;
use crate::upload::HttpTransport;
use anyhow::Result;
use clap::Parser;
use sites_upload_core::{AuthChoice, FileManager, Site, UploadReport};
use std::path::{Path, PathBuf};

/// Root the default `--html` directory is resolved against.
///
/// Fixed at build time: `SITES_UPLOAD_ROOT` if set while compiling, else the
/// workspace root this crate was built from.
pub fn install_root() -> PathBuf {
    match option_env!("SITES_UPLOAD_ROOT") {
        Some(root) => PathBuf::from(root),
        None => {
            let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
            manifest_dir
                .parent()
                .unwrap_or(manifest_dir)
                .to_path_buf()
        }
    }
}

/// `<install root>/build/html`
pub fn default_html_dir() -> PathBuf {
    install_root().join("build").join("html")
}

/// CLI for sites-upload: publish built documentation to the docs/atlas site.
#[derive(Parser)]
#[clap(
    name = "sites-upload",
    version,
    about = "Upload a directory of built HTML documentation to the docs/atlas site"
)]
pub struct Cli {
    /// Token for token-based authentication
    #[clap(long)]
    pub token: Option<String>,

    /// Username for credential-based authentication (needs --password)
    #[clap(long)]
    pub user: Option<String>,

    /// Password for credential-based authentication (needs --user)
    #[clap(long)]
    pub password: Option<String>,

    /// Local directory to upload
    #[clap(long, default_value_os_t = default_html_dir())]
    pub html: PathBuf,

    /// Path to a YAML service config file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the sites service, overriding the config file
    #[clap(long)]
    pub base_url: Option<String>,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
///
/// A user/password pair wins over a token when both are given. Missing
/// credentials fail with [`sites_upload_core::Error::MissingCredentials`] before
/// any transport, site or manager exists.
pub async fn run(cli: Cli) -> Result<UploadReport> {
    tracing::info!(html = %cli.html.display(), "upload_initialised");

    let authenticator = AuthChoice::resolve(
        cli.token.as_deref(),
        cli.user.as_deref(),
        cli.password.as_deref(),
    )
    .into_authenticator()?;
    println!("Authentication via {}", authenticator.method());

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        tracing::info!(base_url = %base_url, "Base URL overridden from command line");
        config.base_url = base_url;
    }
    let transport = HttpTransport::new(&config)?;

    let site = Site::atlas_docs(authenticator);
    let manager = FileManager::new(site, transport);

    let report = manager.upload(&cli.html).await?;
    tracing::info!(
        site = %report.site,
        files = report.file_count(),
        bytes = report.bytes,
        "Publish finished"
    );
    Ok(report)
}
