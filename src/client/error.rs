use std::path::PathBuf;

use thiserror::Error;

/// Describes the various errors that can be returned from the client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Indicates that the given URL is invalid, contains the underlying parsing error
    #[error("Invalid URL given: {0:?}")]
    InvalidURL(#[from] url::ParseError),
    /// Invalid configuration was given to the client, such as a certificate that isn't valid PEM
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// IO errors from reading certificates and keys off of disk
    #[error("Unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The request body could not be serialized. This is likely programmer error
    #[error("Unable to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The exchange with the Groups Web Service failed before a status code was received. This
    /// covers TLS handshake failures, refused connections and timeouts. Contains the underlying
    /// error
    #[error("Error communicating with the Groups Web Service: {0}")]
    Transport(#[from] reqwest::Error),
}
