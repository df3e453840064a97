//! # contract: the network seam
//!
//! [`Transport`] is the single boundary between the [`crate::manager::FileManager`]
//! and the remote sites service. The binary crate provides an HTTP implementation;
//! tests use the `mockall`-generated `MockTransport`, exported under the
//! `test-export-mocks` feature so dependents can mock it too.
//!
//! ## Implementing
//! - Authenticate every request with `site.authenticator`.
//! - `remote_path` is relative to the site's content root and always uses `/`.
//! - Return any failure (connection, non-success status) as a boxed error; the
//!   manager does not retry.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::site::Site;

#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Store `contents` at `remote_path` inside `site`, replacing any existing file.
    async fn put_file(
        &self,
        site: &Site,
        remote_path: &str,
        contents: Vec<u8>,
    ) -> Result<(), TransportError>;
}
