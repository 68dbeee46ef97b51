//! File access backends.

pub mod local;

pub use local::LocalFileProvider;
