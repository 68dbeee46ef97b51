//! Headless session core (state/action/effect).

pub mod action;
pub mod controller;
pub mod effect;
pub mod error;
pub mod handle;
pub mod records;
pub mod services;
pub mod session;
pub mod shell;

pub use action::{Action, EditAction};
pub use controller::{DispatchResult, FolderListing, SessionController, NO_FILES_MESSAGE};
pub use effect::Effect;
pub use error::{FsOp, SessionError};
pub use handle::FileHandle;
pub use records::{FileRecord, FileRecordStore};
pub use session::Session;
pub use shell::{Shell, UserCommand};
