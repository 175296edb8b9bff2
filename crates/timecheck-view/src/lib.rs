//! The timecheck page.
//!
//! This crate contains the view component that shows the server time and the fetcher that asks
//! the server for it.

#![deny(clippy::all)]
#![deny(missing_debug_implementations)]
#![deny(unsafe_code)]
#![deny(non_snake_case)]
#![deny(clippy::cognitive_complexity)]
#![deny(missing_docs)]
#![cfg_attr(any(releasing, not(debug_assertions)), deny(dead_code, unused_imports))]

pub mod components;
mod error;
pub mod fetcher;
pub mod links;

pub use components::{App, AppProps, TimeView, TimeViewProps};
pub use error::{FetchError, FetchResult};
