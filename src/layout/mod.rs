//! Template layout model
//!
//! Elements, layout documents, the undo/redo history and the canvas
//! geometry they live on.

pub mod config;
pub mod document;
pub mod history;
pub mod lint;
pub mod patch;
pub mod seed;
pub mod types;

pub use config::CanvasConfig;
pub use document::{AssetSlot, CanvasSize, LayoutDocument, Orientation, TemplateStyle};
pub use history::History;
pub use lint::{LintCategory, LintWarning};
pub use patch::ElementPatch;
pub use types::*;
