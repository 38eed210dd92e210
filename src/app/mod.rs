//! Application layer - UI-free and unit-testable.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, CharFormat, FormatCommand)
//! - `services/` - Business operations (the rich-text run model)
//! - `collaborators` - Traits the controller talks to (surface, dialogs, status)
//! - `controller` - Document lifecycle and the unsaved-changes gate
//! - `settings`, `messages`, `error`, `file_filters` - ambient plumbing

pub mod collaborators;
pub mod controller;
pub mod domain;
pub mod error;
pub mod file_filters;
pub mod messages;
pub mod services;
pub mod settings;

// Re-exports for convenient external access
pub use collaborators::{ConfirmChoice, DialogService, EditSurface, StatusDisplay};
pub use controller::DocumentController;
pub use domain::{CharFormat, Document, FormatCommand, Rgb};
pub use error::{AppError, Result};
pub use messages::Message;
pub use services::richtext::RichTextModel;
pub use settings::AppSettings;
