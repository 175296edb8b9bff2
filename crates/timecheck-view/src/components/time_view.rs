use yew::prelude::*;

/// Properties of [`TimeView`].
#[derive(Properties, PartialEq, Debug, Clone)]
pub struct TimeViewProps {
    /// The time to display, empty until the first successful request.
    #[prop_or_default]
    pub time: String,
    /// Emitted when the button is clicked.
    pub onclick: Callback<MouseEvent>,
}

/// Renders the page for a given display state.
#[function_component]
pub fn TimeView(props: &TimeViewProps) -> Html {
    let TimeViewProps { time, onclick } = props.clone();

    html! {
        <div class="app">
            <header class="app-header">
                <img src="/logo.svg" class="app-logo" alt="logo" />
                <p>
                    {"Edit "}<code>{"crates/timecheck-view/src/components/time_view.rs"}</code>{" and save to reload."}
                </p>
                <span class="app-time">{time}</span>
                <button type="button" class="app-button" {onclick}>{"Get Time"}</button>
            </header>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use yew::ServerRenderer;

    use super::*;

    async fn render(time: &'static str) -> String {
        ServerRenderer::<TimeView>::with_props(move || TimeViewProps {
            time: time.to_string(),
            onclick: Callback::from(|_| ()),
        })
        .hydratable(false)
        .render()
        .await
    }

    #[tokio::test]
    async fn test_initial_state_is_empty() {
        let s = render("").await;

        assert!(s.contains(r#"<span class="app-time"></span>"#));
        assert!(s.contains("Get Time</button>"));
        assert!(s.contains(r#"alt="logo""#));
    }

    #[tokio::test]
    async fn test_logo_resolves_from_root() {
        let s = render("").await;

        assert!(s.contains(r#"src="/logo.svg""#));
    }

    #[tokio::test]
    async fn test_hint_names_this_file() {
        let s = render("").await;

        assert!(s.contains("crates/timecheck-view/src/components/time_view.rs"));
    }

    #[tokio::test]
    async fn test_displays_time_verbatim() {
        let s = render("12:00:00").await;

        assert!(s.contains(r#"<span class="app-time">12:00:00</span>"#));
    }

    #[tokio::test]
    async fn test_does_not_render_errors() {
        let s = render("").await;

        assert!(!s.to_lowercase().contains("error"));
        assert!(!s.to_lowercase().contains("fail"));
    }
}
