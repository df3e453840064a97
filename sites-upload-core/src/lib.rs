#![doc = "sites-upload-core: core logic for publishing documentation to a sites namespace."]

//! Credential resolution, the site handle, and the file manager that walks a
//! local directory and pushes it through a [`contract::Transport`].
//! Nothing in this crate talks to the network directly.

pub mod auth;
pub mod contract;
pub mod error;
pub mod manager;
pub mod site;

pub use auth::{AuthChoice, Authenticator};
pub use error::{Error, TransportError};
pub use manager::{FileManager, UploadReport};
pub use site::Site;
