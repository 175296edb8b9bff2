use stylist::{css, StyleSource};
use stylist::yew::Global;
use yew::prelude::*;

use super::TimeView;
use crate::fetcher::spawn_fetch;
use crate::links::Link;

/// Properties of [`App`].
#[derive(Properties, Debug)]
pub struct AppProps<L>
where
    L: PartialEq,
{
    /// The link used to ask the server for its time.
    pub link: L,
}

impl<L> PartialEq for AppProps<L>
where
    L: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}

fn global_style() -> StyleSource {
    css!(r#"
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Roboto", "Oxygen",
                "Ubuntu", "Cantarell", "Fira Sans", "Droid Sans", "Helvetica Neue", sans-serif;
            -webkit-font-smoothing: antialiased;
            -moz-osx-font-smoothing: grayscale;
        }

        code {
            font-family: source-code-pro, Menlo, Monaco, Consolas, "Courier New", monospace;
        }

        .app {
            text-align: center;
        }

        .app-logo {
            height: 40vmin;
            pointer-events: none;
        }

        @media (prefers-reduced-motion: no-preference) {
            .app-logo {
                animation: app-logo-spin infinite 20s linear;
            }
        }

        @keyframes app-logo-spin {
            from {
                transform: rotate(0deg);
            }
            to {
                transform: rotate(360deg);
            }
        }

        .app-header {
            background-color: #282c34;
            min-height: 100vh;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            font-size: calc(10px + 2vmin);
            color: white;
        }

        .app-time {
            min-height: 1.5em;
            padding-bottom: 1rem;
        }

        .app-button {
            height: 40px;
            padding-left: 1.5rem;
            padding-right: 1.5rem;

            border: 0;
            border-radius: 8px;

            background-color: rgb(97, 218, 251);
            color: rgb(40, 44, 52);

            cursor: pointer;

            font-size: 1rem;
            font-weight: bold;
        }
    "#)
}

/// The timecheck page.
///
/// Owns the displayed time, which starts out empty on every mount. Each click on the button
/// starts an independent request; the button stays enabled while requests are in flight.
#[function_component]
pub fn App<L>(props: &AppProps<L>) -> Html
where
    L: 'static + Link,
{
    let time = use_state_eq(String::new);

    let onclick = use_callback(
        |_input: MouseEvent, deps| {
            let (link, display) = deps;
            spawn_fetch(L::clone(link), UseStateSetter::clone(display));
        },
        (props.link.clone(), time.setter()),
    );

    html! {
        <>
            <Global css={global_style()} />
            <TimeView time={(*time).clone()} {onclick} />
        </>
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use timecheck_api::TimeResponse;
    use yew::ServerRenderer;

    use super::*;
    use crate::error::FetchResult;

    #[derive(Debug, Clone, PartialEq)]
    struct StaticLink;

    #[async_trait(?Send)]
    impl Link for StaticLink {
        async fn resolve_time(&self) -> FetchResult<TimeResponse> {
            Ok(TimeResponse::new("12:00:00"))
        }
    }

    #[tokio::test]
    async fn test_mounts_with_empty_time() {
        let s = ServerRenderer::<App<StaticLink>>::with_props(|| AppProps { link: StaticLink })
            .hydratable(false)
            .render()
            .await;

        assert!(s.contains(r#"<span class="app-time"></span>"#));
        assert!(s.contains("Get Time</button>"));
    }

    #[test]
    fn test_logo_spins() {
        let style = format!("{:?}", global_style());

        assert!(style.contains("app-logo-spin"));
        assert!(style.contains("prefers-reduced-motion"));
        assert!(style.contains("animation"));
    }
}
