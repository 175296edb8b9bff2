use std::fmt;
use std::path::{Path, PathBuf};

use rust_embed::{EmbeddedFile, RustEmbed};
use warp::filters::fs::File;
use warp::filters::BoxedFilter;
use warp::path::Tail;
use warp::reply::{with_header, Response};
use warp::{Filter, Rejection, Reply};

type GetFileFn = fn(&str) -> Option<EmbeddedFile>;

#[derive(Clone)]
enum Inner {
    Path(PathBuf),
    Embed { get_file: GetFileFn },
}

impl fmt::Debug for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inner::Path(ref p) => f.debug_struct("Inner::Path").field("0", p).finish(),
            Inner::Embed { .. } => f.debug_struct("Inner::Embed").finish_non_exhaustive(),
        }
    }
}

/// A built frontend.
///
/// Paths that do not name a file are answered with `index.html`, so routes handled by the page
/// itself survive a reload.
#[derive(Debug, Clone)]
pub struct Frontend {
    inner: Inner,
}

impl Frontend {
    /// Serves the frontend from a directory.
    pub fn new_path<P>(p: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            inner: Inner::Path(p.into()),
        }
    }

    /// Serves the frontend embedded in `E`.
    pub fn new_embedded<E>() -> Self
    where
        E: RustEmbed,
    {
        Self {
            inner: Inner::Embed { get_file: E::get },
        }
    }

    /// Returns the directory this frontend is served from, if any.
    pub fn path(&self) -> Option<&Path> {
        match self.inner {
            Inner::Path(ref m) => Some(m.as_path()),
            Inner::Embed { .. } => None,
        }
    }

    /// Returns `true` if this frontend has an `index.html`.
    pub fn has_index_html(&self) -> bool {
        match self.inner {
            Inner::Path(ref m) => m.join("index.html").is_file(),
            Inner::Embed { get_file } => get_file("index.html").is_some(),
        }
    }

    pub(crate) fn into_warp_filter(self) -> BoxedFilter<(Response,)> {
        match self.inner {
            Inner::Path(m) => {
                let index_html = m.join("index.html");

                warp::fs::dir(m)
                    .or(warp::fs::file(index_html))
                    .unify()
                    .map(|m: File| m.into_response())
                    .boxed()
            }
            Inner::Embed { get_file } => warp::get()
                .and(warp::path::tail())
                .and_then(move |path: Tail| async move {
                    let (name, asset) = match get_file(path.as_str()) {
                        Some(m) => (path.as_str().to_string(), m),
                        None => (
                            "index.html".to_string(),
                            get_file("index.html").ok_or_else(warp::reject::not_found)?,
                        ),
                    };
                    let mime = mime_guess::from_path(&name).first_or_octet_stream();

                    Ok::<_, Rejection>(
                        with_header(
                            warp::hyper::Response::new(asset.data),
                            "content-type",
                            mime.as_ref(),
                        )
                        .into_response(),
                    )
                })
                .boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use warp::http::StatusCode;

    use super::*;

    fn built_frontend() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<!DOCTYPE html><title>index</title>").unwrap();
        fs::write(dir.path().join("logo.svg"), "<svg></svg>").unwrap();

        dir
    }

    #[tokio::test]
    async fn test_serves_files() {
        let dir = built_frontend();
        let f = Frontend::new_path(dir.path()).into_warp_filter();

        let resp = warp::test::request().path("/logo.svg").reply(&f).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/svg+xml");
        assert_eq!(resp.body().as_ref(), b"<svg></svg>");
    }

    #[tokio::test]
    async fn test_falls_back_to_index() {
        let dir = built_frontend();
        let f = Frontend::new_path(dir.path()).into_warp_filter();

        for path in ["/", "/some/page", "/missing.js"] {
            let resp = warp::test::request().path(path).reply(&f).await;

            assert_eq!(resp.status(), StatusCode::OK, "{path}");
            assert_eq!(
                resp.body().as_ref(),
                b"<!DOCTYPE html><title>index</title>",
                "{path}"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let frontend = Frontend::new_path(dir.path());
        assert!(!frontend.has_index_html());

        let resp = warp::test::request()
            .path("/some/page")
            .reply(&frontend.into_warp_filter())
            .await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_path() {
        let dir = built_frontend();
        let frontend = Frontend::new_path(dir.path());

        assert_eq!(frontend.path(), Some(dir.path()));
        assert!(frontend.has_index_html());
    }
}
