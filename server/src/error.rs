/// Server-local failures.
///
/// Protocol violations and authentication rejections are not errors here:
/// they are session events handled inside the connection loop and never
/// leave it. A peer disconnect mid-read is a normal teardown path, surfaced
/// by the gateway as a plain return rather than an error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] protocol::CodecError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
