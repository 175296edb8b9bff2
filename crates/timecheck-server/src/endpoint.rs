use std::convert::Infallible;
use std::future::Future;

use hyper::{Body, Request, Response};
use tower_service::Service;
use warp::{log, Filter, Rejection, Reply};

use crate::api::time_filter;
use crate::frontend::Frontend;
use crate::proxy::Proxy;

/// The target access events are emitted on.
pub(crate) const ACCESS_LOG_TARGET: &str = "timecheck_server::endpoint::trace";

/// Creates a timecheck endpoint that can be turned into a warp filter.
///
/// This endpoint always serves `/api`. Other requests go to the frontend, which is either a
/// [`Proxy`] to a development server or a built [`Frontend`]. Without either, they are answered
/// with `404`.
#[derive(Debug, Default)]
pub struct Endpoint {
    proxy: Option<Proxy>,
    frontend: Option<Frontend>,
}

impl Endpoint {
    /// Creates an endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards frontend requests to a development server.
    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);

        self
    }

    /// Serves a frontend with current endpoint.
    pub fn with_frontend(mut self, frontend: Frontend) -> Self {
        self.frontend = Some(frontend);

        self
    }

    /// Creates a warp filter from current endpoint.
    pub fn into_warp_filter(
        self,
    ) -> impl Clone + Send + Sync + Filter<Extract = (impl Reply + Send,), Error = Rejection> {
        let Self { proxy, frontend } = self;

        let mut routes = time_filter().boxed();

        if let Some(m) = frontend {
            routes = routes.or(m.into_warp_filter()).unify().boxed();
        }

        if let Some(m) = proxy {
            routes = routes.or(m.into_warp_filter()).unify().boxed();
        }

        routes.with(log::custom(|info| {
            // We emit a custom target so it won't interfere with warp's default tracing event.
            tracing::info!(target: ACCESS_LOG_TARGET,
                remote_addr = ?info.remote_addr(),
                method = %info.method(),
                path = info.path(),
                status = info.status().as_u16(),
                referer = ?info.referer(),
                user_agent = ?info.user_agent(),
                duration = info.elapsed().as_nanos());
        }))
    }

    /// Creates a tower service from current endpoint.
    pub fn into_tower_service(
        self,
    ) -> impl 'static
           + Clone
           + Send
           + Service<
        Request<Body>,
        Response = Response<Body>,
        Error = Infallible,
        Future = impl 'static + Send + Future<Output = Result<Response<Body>, Infallible>>,
    > {
        warp::service(self.into_warp_filter())
    }
}
