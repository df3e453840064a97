use tracing::info;

use crate::auth::Authenticator;

/// Space holding all documentation sites.
pub const DOCS_SPACE: &str = "docs";
/// Site the atlas documentation is published to.
pub const ATLAS_SITE: &str = "atlas";

/// A remote namespace content is published under, plus the credentials used to reach it.
#[derive(Debug, Clone)]
pub struct Site {
    pub space: String,
    pub name: String,
    pub authenticator: Authenticator,
}

impl Site {
    pub fn new(
        space: impl Into<String>,
        name: impl Into<String>,
        authenticator: Authenticator,
    ) -> Self {
        let site = Site {
            space: space.into(),
            name: name.into(),
            authenticator,
        };
        info!(
            site = %site.path(),
            auth = site.authenticator.method(),
            "Site handle created"
        );
        site
    }

    /// The `docs/atlas` site.
    pub fn atlas_docs(authenticator: Authenticator) -> Self {
        Site::new(DOCS_SPACE, ATLAS_SITE, authenticator)
    }

    /// `<space>/<name>`
    pub fn path(&self) -> String {
        format!("{}/{}", self.space, self.name)
    }
}
