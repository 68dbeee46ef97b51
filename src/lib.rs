//! slate - a small terminal code editor built around an open-file session.
//!
//! - kernel: session core (records, controller, persistence, ports/adapters)
//! - models: text buffer
//! - core / tui / app: terminal frontend (feature `tui`)

pub mod kernel;
pub mod models;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod core;
#[cfg(feature = "tui")]
pub mod tui;
