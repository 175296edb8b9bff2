use thiserror::Error;

/// The error type returned by server methods.
#[derive(Error, Debug)]
pub enum ServerError {
    /// failed to bind the listen address.
    #[error("failed to bind listen address")]
    Bind(#[source] hyper::Error),

    /// the proxy address cannot be used.
    #[error("proxy address must be an http(s) url, got: {0}")]
    ProxyAddr(String),

    /// failed to create the client used by the proxy.
    #[error("failed to create proxy client")]
    ProxyClient(#[from] reqwest::Error),

    /// the embed mode is requested but nothing is embedded.
    #[error("this binary is built without an embedded frontend, rebuild it with the `embed` feature")]
    NoEmbeddedFrontend,
}

/// The result type returned by server methods.
pub type ServerResult<T> = Result<T, ServerError>;
