//! Components of the timecheck page.

mod app;
mod time_view;

pub use app::{App, AppProps};
pub use time_view::{TimeView, TimeViewProps};
