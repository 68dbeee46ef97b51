use std::path::PathBuf;

/// What the frontend must do after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open-files strip or active file changed.
    Render,
    RenderFolder { dir: PathBuf, names: Vec<String> },
    Notify(String),
}
