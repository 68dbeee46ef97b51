//! Services layer (ports + adapters).
//!
//! - `ports`: contracts and data types the session core depends on.
//! - `adapters`: local filesystem and per-user directory implementations.

pub mod adapters;
pub mod ports;
