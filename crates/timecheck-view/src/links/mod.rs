//! Links carry a time request to the server.
//!
//! The page talks to the server through a [`Link`]. In the browser this is [`FetchLink`], other
//! links can be plugged in to run the page against something else.

use std::future::Future;

use async_trait::async_trait;
use timecheck_api::TimeResponse;

use crate::{FetchError, FetchResult};

mod fetch_link;

pub use fetch_link::FetchLink;

/// A transport that resolves a time request.
#[async_trait(?Send)]
pub trait Link: Clone + PartialEq {
    /// Sends exactly one request for the server time.
    async fn resolve_time(&self) -> FetchResult<TimeResponse>;
}

/// Interprets a response to a time request.
///
/// A status outside of `2xx` fails immediately and `read_body` is never called. Otherwise the body
/// is decoded as a [`TimeResponse`].
pub async fn read_time_response<F, Fut>(status: u16, read_body: F) -> FetchResult<TimeResponse>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, gloo_net::Error>>,
{
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    let body = read_body().await?;

    Ok(serde_json::from_str(&body)?)
}
