// Domain layer modules
pub mod language;
pub mod todo_item;

// Re-exports
pub use language::{select_dominant_language, LanguageCandidate};
pub use todo_item::{current_timestamp_millis, TodoItem};
