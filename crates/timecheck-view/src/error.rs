use thiserror::Error;

/// An error that can happen while asking the server for its time.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("failed to communicate with server")]
    Network(#[from] gloo_net::Error),

    /// The server answered with a status outside of `2xx`.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The body is not a time response.
    #[error("failed to decode time response")]
    Decode(#[from] serde_json::Error),
}

/// The result type of a time request.
pub type FetchResult<T> = Result<T, FetchError>;
