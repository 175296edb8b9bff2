//! The time fetcher.
//!
//! Every call performs exactly one request. There is no retry, no cancellation and no
//! de-duplication: concurrent calls race and whichever completes last writes the display state.

use yew::platform::spawn_local;
use yew::functional::UseStateSetter;

use crate::links::Link;
use crate::FetchResult;

/// Asks the server for its time once and hands the value to `on_time`.
///
/// The time is passed on verbatim. On failure `on_time` is not called and the error is logged;
/// the error is also returned for callers that want to inspect it.
pub async fn fetch_time<L, F>(link: &L, on_time: F) -> FetchResult<()>
where
    L: Link,
    F: FnOnce(String),
{
    match link.resolve_time().await {
        Ok(m) => {
            tracing::debug!(time = %m.time, "received server time");
            on_time(m.time);

            Ok(())
        }
        Err(e) => {
            tracing::error!(reason = %e, "failed to fetch server time");

            Err(e)
        }
    }
}

/// Starts a fetch in the background and writes the result into a display state.
///
/// The caller is never blocked and can start another fetch right away.
pub fn spawn_fetch<L>(link: L, display: UseStateSetter<String>)
where
    L: 'static + Link,
{
    spawn_local(async move {
        let _ = fetch_time(&link, |m| display.set(m)).await;
    });
}
