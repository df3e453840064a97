//! Publishes a local directory into a site through a [`Transport`].
//!
//! The walk is sorted by file name so uploads happen in a stable order, and the
//! first failing file stops the run. Nothing is deleted remotely; files already
//! on the site are overwritten when the same relative path is uploaded again.

use std::path::{Component, Path};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::contract::Transport;
use crate::error::Error;
use crate::site::Site;

/// What an upload pushed to the site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub site: String,
    pub remote_paths: Vec<String>,
    pub bytes: u64,
}

impl UploadReport {
    pub fn file_count(&self) -> usize {
        self.remote_paths.len()
    }
}

/// Client-side handle bound to a single [`Site`].
pub struct FileManager<T> {
    site: Site,
    transport: T,
}

impl<T> FileManager<T>
where
    T: Transport,
{
    pub fn new(site: Site, transport: T) -> Self {
        info!(site = %site.path(), "File manager bound to site");
        Self { site, transport }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Upload every regular file below `local_path` into the site's content root.
    ///
    /// # Errors
    /// [`Error::NotADirectory`] before any network call if `local_path` is not a
    /// directory; otherwise the first walk, read or transport failure.
    pub async fn upload(&self, local_path: &Path) -> Result<UploadReport, Error> {
        let site = self.site.path();
        info!(local_path = %local_path.display(), site = %site, "Starting upload");

        if !local_path.is_dir() {
            error!(local_path = %local_path.display(), "Upload source is not a directory");
            return Err(Error::NotADirectory(local_path.to_path_buf()));
        }

        let mut report = UploadReport {
            site: site.clone(),
            ..UploadReport::default()
        };

        // Symlinked files and directories are uploaded as what they point to.
        for entry in WalkDir::new(local_path)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| {
                error!(error = %source, "Failed to walk upload directory");
                Error::Walk {
                    path: local_path.to_path_buf(),
                    source,
                }
            })?;
            if !entry.file_type().is_file() {
                if !entry.file_type().is_dir() {
                    warn!(
                        path = %entry.path().display(),
                        "Skipping entry that is not a regular file"
                    );
                }
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(local_path) else {
                continue;
            };
            let remote_path = remote_path(relative)?;

            let contents = std::fs::read(entry.path()).map_err(|source| {
                error!(path = %entry.path().display(), error = %source, "Failed to read file");
                Error::Read {
                    path: entry.path().to_path_buf(),
                    source,
                }
            })?;
            let size = contents.len() as u64;

            debug!(remote_path = %remote_path, bytes = size, "Uploading file");
            if let Err(source) = self
                .transport
                .put_file(&self.site, &remote_path, contents)
                .await
            {
                error!(remote_path = %remote_path, error = %source, "Upload failed");
                return Err(Error::Transport {
                    site,
                    remote_path,
                    source,
                });
            }

            report.bytes += size;
            report.remote_paths.push(remote_path);
        }

        info!(
            site = %report.site,
            files = report.file_count(),
            bytes = report.bytes,
            "Upload complete"
        );
        Ok(report)
    }
}

/// Site-relative path with `/` separators on every platform.
///
/// Names that are not valid UTF-8 are rejected rather than lossily converted,
/// so two local files can never map onto the same remote path.
fn remote_path(relative: &Path) -> Result<String, Error> {
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let Some(part) = part.to_str() else {
                error!(path = %relative.display(), "File name is not valid UTF-8");
                return Err(Error::NonUtf8Path(relative.to_path_buf()));
            };
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
