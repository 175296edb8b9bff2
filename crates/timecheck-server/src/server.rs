use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::server::conn::AddrIncoming;
use hyper::{Body, Request, Response};
use tower_service::Service;

use crate::error::{ServerError, ServerResult};

/// An HTTP server bound to a socket.
#[derive(Debug)]
pub struct Server {
    inner: hyper::server::Builder<AddrIncoming>,
    local_addr: SocketAddr,
}

impl Server {
    /// Binds a server to `addr`.
    pub fn bind(addr: impl Into<SocketAddr>) -> ServerResult<Self> {
        let incoming = AddrIncoming::bind(&addr.into()).map_err(ServerError::Bind)?;
        let local_addr = incoming.local_addr();

        Ok(Self {
            inner: hyper::Server::builder(incoming),
            local_addr,
        })
    }

    /// Returns the address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Closes connections that do not send their request headers within `timeout`.
    pub fn header_read_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.http1_header_read_timeout(timeout);

        self
    }

    /// Serves `svc` until `shutdown` resolves.
    ///
    /// In-flight requests are allowed to finish after `shutdown` resolves.
    pub async fn serve_service<S, F>(self, svc: S, shutdown: F) -> hyper::Result<()>
    where
        S: Service<Request<Body>, Response = Response<Body>, Error = Infallible>
            + Send
            + Clone
            + 'static,
        S::Future: Send + 'static,
        F: Future<Output = ()>,
    {
        let make_svc = hyper::service::make_service_fn(move |_| {
            let svc = svc.clone();
            async move { Ok::<_, Infallible>(svc) }
        });

        self.inner
            .serve(make_svc)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

#[cfg(test)]
mod tests {
    use timecheck_api::TimeResponse;
    use tokio::sync::oneshot;

    use super::*;
    use crate::Endpoint;

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let server = Server::bind(([127, 0, 0, 1], 0)).unwrap();
        let addr = server.local_addr();

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve_service(
            Endpoint::new().into_tower_service(),
            async move {
                let _ = rx.await;
            },
        ));

        let resp = reqwest::get(format!("http://{addr}/api")).await.unwrap();
        assert!(resp.status().is_success());

        let body: TimeResponse = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
        assert!(!body.time.is_empty());

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
