//! Tracing support.

use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Sends tracing events to the browser console.
///
/// Errors end up in `console.error`, which is where failed time requests are reported.
pub fn init_default() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    tracing_subscriber::registry().with(fmt_layer).init();
}
