//! Tracing support.

use console::style;
use tracing::field::Visit;
use tracing::{Level, Subscriber};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::endpoint::ACCESS_LOG_TARGET;

/// A layer that emits pretty access logs for timecheck servers.
#[derive(Debug, Default)]
pub struct AccessLog {}

/// Returns a layer that emits pretty access logs.
pub fn pretty_access() -> AccessLog {
    AccessLog {}
}

fn format_access(method: &str, status: u64, duration_ns: u128, path: &str) -> String {
    let duration = duration_ns as f64 / 1_000_000.0;

    let status = match status {
        m if m < 200 => style(m).cyan(),
        m if m < 300 => style(m).green(),
        m if m < 400 => style(m).yellow(),
        m => style(m).red(),
    }
    .bold();

    format!("{method:>6} {status} {duration:>8.2}ms {path}")
}

impl<S> Layer<S> for AccessLog
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != ACCESS_LOG_TARGET {
            return;
        }

        #[derive(Default, Debug)]
        struct Values {
            duration: Option<u128>,
            path: Option<String>,
            method: Option<String>,
            status: Option<u64>,
        }

        impl Visit for Values {
            fn record_u128(&mut self, field: &tracing::field::Field, value: u128) {
                if field.name() == "duration" {
                    self.duration = Some(value);
                }
            }

            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "path" {
                    self.path = Some(value.to_string());
                }
            }

            fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
                if field.name() == "status" {
                    self.status = Some(value);
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "method" {
                    self.method = Some(format!("{value:?}"));
                }
            }
        }

        let mut values = Values::default();
        event.record(&mut values);

        if let (Some(path), Some(duration), Some(status), Some(method)) =
            (values.path, values.duration, values.status, values.method)
        {
            eprintln!("{}", format_access(&method, status, duration, &path));
        }
    }
}

/// Initialise tracing with default settings.
///
/// The filter is read from the environment variable `var_name`, defaulting to `info`. With
/// `pretty` set, access events are rendered as one coloured line each, which reads better next to
/// a development server.
pub fn init_default<S>(var_name: S, pretty: bool)
where
    S: Into<String>,
{
    let var_name = var_name.into();
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .with_env_var(var_name)
        .from_env_lossy();

    if pretty {
        tracing_subscriber::registry()
            .with(pretty_access())
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    // access logs are processed by the access log layer
                    .with_filter(filter_fn(|metadata| metadata.target() != ACCESS_LOG_TARGET)),
            )
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().compact())
            .with(env_filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_access() {
        console::set_colors_enabled_stderr(false);
        console::set_colors_enabled(false);

        let s = format_access("GET", 200, 1_500_000, "/api");
        assert_eq!(s, "   GET 200     1.50ms /api");
    }
}
