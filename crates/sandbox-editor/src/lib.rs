pub mod commands;
pub mod session;
#[cfg(feature = "submit")]
pub mod submit;
pub mod tools;

pub use commands::{CommandStack, Edit};
pub use session::{ClickOutcome, DesignSession, DragOutcome, Measurement};
#[cfg(feature = "submit")]
pub use submit::{
    ContactInfo, Lead, LeadKind, LeadStore, LocalStore, StorageError, SubmissionOutcome, Submitter,
    spawn_submitter,
};
pub use tools::{ShortcutAction, ToolKind, ViewMode, resolve_shortcut};
