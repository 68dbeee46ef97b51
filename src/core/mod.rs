//! Terminal input events, normalised for the frontend.

pub mod event;

pub use event::{InputEvent, Key};
