use std::path::PathBuf;

/// Boxed error returned by [`crate::contract::Transport`] implementations.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can stop a publish run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither a token nor a complete user/password pair was supplied.
    #[error("no token, or user/password was provided")]
    MissingCredentials,

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Remote paths must be UTF-8; lossy conversion could make two files collide.
    #[error("{} is not a valid UTF-8 path", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("failed to walk {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upload of {remote_path} to {site} failed")]
    Transport {
        site: String,
        remote_path: String,
        #[source]
        source: TransportError,
    },
}
