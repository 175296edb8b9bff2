//! The timecheck server.
//!
//! Answers `GET /api` with the current server time and serves the frontend, either by proxying to
//! a development server, from a directory, or from files embedded into the binary.

#![deny(clippy::all)]
#![deny(missing_debug_implementations)]
#![deny(unsafe_code)]
#![deny(non_snake_case)]
#![deny(clippy::cognitive_complexity)]
#![deny(missing_docs)]
#![cfg_attr(any(releasing, not(debug_assertions)), deny(dead_code, unused_imports))]

mod api;
mod cli;
mod endpoint;
mod env_file;
mod error;
mod frontend;
mod proxy;
mod server;
pub mod trace;

pub use api::format_time;
pub use cli::{Cli, Mode};
pub use endpoint::Endpoint;
pub use error::{ServerError, ServerResult};
pub use frontend::Frontend;
pub use proxy::Proxy;
pub use server::Server;
