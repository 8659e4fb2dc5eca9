pub mod handler;

// Re-export the essential types
pub use handler::{Action, ActionDispatcher};
