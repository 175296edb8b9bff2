use time::macros::format_description;
use time::OffsetDateTime;
use timecheck_api::{TimeResponse, API_PATH};
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::{Filter, Rejection, Reply};

/// Formats a time the way `/api` reports it.
pub fn format_time(t: OffsetDateTime) -> Result<String, time::error::Format> {
    t.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:9] [offset_hour sign:mandatory]:[offset_minute]"
    ))
}

fn now() -> OffsetDateTime {
    // The local offset cannot always be determined, e.g. on multi-threaded unix processes.
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn time_reply() -> Response {
    match format_time(now()) {
        Ok(m) => reply::json(&TimeResponse::new(m)).into_response(),
        Err(e) => {
            tracing::error!(reason = %e, "cannot format time");

            reply::with_status("", StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}

/// A filter that answers `GET /api` with the current time.
pub(crate) fn time_filter() -> impl Clone + Send + Sync + Filter<Extract = (Response,), Error = Rejection>
{
    warp::path(API_PATH.trim_start_matches('/'))
        .and(warp::path::end())
        .and(warp::get())
        .map(time_reply)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use timecheck_api::TimeResponse;

    use super::*;

    #[test]
    fn test_format_time() {
        let s = format_time(datetime!(2024-01-02 03:04:05.000000006 +1)).unwrap();
        assert_eq!(s, "2024-01-02 03:04:05.000000006 +01:00");

        let s = format_time(datetime!(1999-12-31 23:59:59 -5:30)).unwrap();
        assert_eq!(s, "1999-12-31 23:59:59.000000000 -05:30");
    }

    #[tokio::test]
    async fn test_get_time() {
        let resp = warp::test::request()
            .method("GET")
            .path("/api")
            .reply(&time_filter())
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");

        let body: TimeResponse = serde_json::from_slice(resp.body()).unwrap();
        assert!(!body.time.is_empty());
    }

    #[tokio::test]
    async fn test_other_paths_are_not_matched() {
        for path in ["/", "/api/time", "/apis"] {
            let matched = warp::test::request()
                .method("GET")
                .path(path)
                .matches(&time_filter())
                .await;

            assert!(!matched, "{path} should not match");
        }
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let matched = warp::test::request()
            .method("POST")
            .path("/api")
            .matches(&time_filter())
            .await;

        assert!(!matched);
    }
}
