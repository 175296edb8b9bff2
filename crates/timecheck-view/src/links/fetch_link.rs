use std::cell::Cell;

use async_trait::async_trait;
use futures::{future, FutureExt, TryFutureExt};
use gloo_net::http::Request;
use timecheck_api::{TimeResponse, API_PATH};
use typed_builder::TypedBuilder;

use super::{read_time_response, Link};
use crate::{FetchError, FetchResult};

/// A Link implemented with `fetch`, this requires a WebAssembly target with available global
/// `fetch`.
///
/// # Example
///
/// ```
/// # use timecheck_view::links::FetchLink;
/// let link = FetchLink::builder()
///     .url("/api") // Defaults to `/api`.
///     .build();
/// ```
#[derive(TypedBuilder, Debug, Clone)]
pub struct FetchLink {
    /// The URL of the time endpoint, defaults to `/api`.
    #[builder(setter(into), default_code = "API_PATH.to_string()")]
    url: String,

    /// The link equity tracker.
    #[builder(setter(skip), default_code = r#"FetchLink::next_id()"#)]
    id: usize,
}

impl Default for FetchLink {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PartialEq for FetchLink {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl FetchLink {
    fn next_id() -> usize {
        thread_local! {
            static ID: Cell<usize> = Cell::new(0);
        }

        ID.with(|m| {
            m.set(m.get() + 1);

            m.get()
        })
    }

    /// Returns the URL this link sends requests to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl Link for FetchLink {
    async fn resolve_time(&self) -> FetchResult<TimeResponse> {
        future::ready(self.url.as_str())
            .map(Request::get)
            .then(|m| m.send())
            .map_err(FetchError::Network)
            .and_then(|m| async move { read_time_response(m.status(), || m.text()).await })
            .await
    }
}
