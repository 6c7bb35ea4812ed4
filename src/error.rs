// Error kinds surfaced at the library boundary.
//
// The text pipeline itself never fails. Everything that talks to the outside
// world (credentials, the Twitter API, the font asset, the output image)
// reports one of these four kinds, and the binary prints the message and exits.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    /// Bad or expired credentials, or the API was unreachable while verifying them.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network or authorization failure while fetching posts or messages.
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// Malformed key file, missing credential, unknown option value, missing font.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Nothing to draw, or the output image could not be written.
    #[error("Render failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
