use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Url};
use warp::filters::BoxedFilter;
use warp::http::header::{self, HeaderMap, HeaderName};
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reply::{self, Response};
use warp::ws::Ws;
use warp::{Filter, Rejection, Reply};

use crate::error::{ServerError, ServerResult};

mod websocket;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

// Headers that only apply to a single connection.
static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::HOST,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

/// Forwards frontend requests to a development server.
///
/// Websocket upgrades are bridged to the upstream as well, which keeps the live reload of the
/// development server working while `/api` is answered locally.
#[derive(Debug, Clone)]
pub struct Proxy {
    upstream: Url,
    client: Client,
}

impl Proxy {
    /// Creates a proxy to `upstream`.
    pub fn new(mut upstream: Url) -> ServerResult<Self> {
        if !matches!(upstream.scheme(), "http" | "https") || upstream.cannot_be_a_base() {
            return Err(ServerError::ProxyAddr(upstream.to_string()));
        }

        // Requests are joined onto the upstream, which only keeps the last segment with a slash.
        if !upstream.path().ends_with('/') {
            let path = format!("{}/", upstream.path());
            upstream.set_path(&path);
        }

        let client = Client::builder().timeout(UPSTREAM_TIMEOUT).build()?;

        Ok(Self { upstream, client })
    }

    /// Returns the address requests are forwarded to.
    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    fn target_url(&self, path: &str, query: &str) -> Option<Url> {
        let mut url = self.upstream.join(path.trim_start_matches('/')).ok()?;
        url.set_query(Some(query).filter(|m| !m.is_empty()));

        Some(url)
    }

    async fn forward(
        &self,
        method: Method,
        url: Url,
        mut headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, reqwest::Error> {
        strip_hop_by_hop(&mut headers);

        let resp = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let mut headers = resp.headers().clone();
        strip_hop_by_hop(&mut headers);
        headers.remove(header::CONTENT_LENGTH);

        let body = resp.bytes().await?;

        let mut reply = Response::new(body.into());
        *reply.status_mut() = status;
        *reply.headers_mut() = headers;

        Ok(reply)
    }

    fn websocket_url(&self, path: &str, query: &str) -> Option<Url> {
        let mut url = self.target_url(path, query)?;
        let scheme = match url.scheme() {
            "https" => "wss",
            _ => "ws",
        };
        url.set_scheme(scheme).ok()?;

        Some(url)
    }

    fn create_websocket_filter(&self) -> BoxedFilter<(Response,)> {
        let proxy = self.clone();

        warp::ws()
            .and(warp::path::full())
            .and(warp::query::raw().or_else(|_| async move { Ok::<_, Rejection>((String::new(),)) }))
            .then(move |ws: Ws, path: FullPath, raw_queries: String| {
                let proxy = proxy.clone();

                async move {
                    let url = match proxy.websocket_url(path.as_str(), &raw_queries) {
                        Some(m) => m,
                        None => {
                            return reply::with_status("", StatusCode::BAD_REQUEST).into_response()
                        }
                    };

                    // The upstream is connected before the client is upgraded, so a dead
                    // development server is reported to the browser as a failed handshake.
                    match websocket::connect(&url).await {
                        Ok(upstream) => ws
                            .on_upgrade(move |client| websocket::bridge(client, upstream))
                            .into_response(),
                        Err(e) => {
                            tracing::warn!(%url, reason = %e, "failed to reach upstream websocket");

                            reply::with_status("", StatusCode::BAD_GATEWAY).into_response()
                        }
                    }
                }
            })
            .boxed()
    }

    fn create_http_filter(&self) -> BoxedFilter<(Response,)> {
        let proxy = self.clone();

        warp::method()
            .and(warp::path::full())
            .and(warp::query::raw().or_else(|_| async move { Ok::<_, Rejection>((String::new(),)) }))
            .and(warp::header::headers_cloned())
            .and(warp::body::bytes())
            .then(
                move |method: Method,
                      path: FullPath,
                      raw_queries: String,
                      headers: HeaderMap,
                      body: Bytes| {
                    let proxy = proxy.clone();

                    async move {
                        let url = match proxy.target_url(path.as_str(), &raw_queries) {
                            Some(m) => m,
                            None => {
                                return reply::with_status("", StatusCode::BAD_REQUEST)
                                    .into_response()
                            }
                        };

                        match proxy.forward(method, url.clone(), headers, body).await {
                            Ok(m) => m,
                            Err(e) => {
                                tracing::warn!(%url, reason = %e, "failed to reach upstream");

                                reply::with_status("", StatusCode::BAD_GATEWAY).into_response()
                            }
                        }
                    }
                },
            )
            .boxed()
    }

    pub(crate) fn into_warp_filter(self) -> BoxedFilter<(Response,)> {
        // Upgrade requests go first, the http filter would forward them as plain requests.
        self.create_websocket_filter()
            .or(self.create_http_filter())
            .unify()
            .boxed()
    }
}
