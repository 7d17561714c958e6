use thiserror::Error;

/// urlspan error types.
///
/// Scanning never fails; errors only come from building a dictionary or
/// loading its configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid TLD {tld:?}: length {len} exceeds the encodable maximum")]
    InvalidTld { tld: String, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TLD list configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
