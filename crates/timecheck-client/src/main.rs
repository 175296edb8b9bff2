#![deny(clippy::all)]
#![deny(missing_debug_implementations)]

use timecheck_view::links::FetchLink;
use timecheck_view::{App, AppProps};

mod trace;

fn main() {
    // Setup Logging
    trace::init_default();

    // Start Application
    let link = FetchLink::builder().build();
    yew::Renderer::<App<FetchLink>>::with_props(AppProps { link }).render();
}
