// Infrastructure layer modules
pub mod app_context;
pub mod config;
pub mod language_detector;
pub mod logging;
pub mod table_admin;
pub mod todo_repository;
pub mod translator;

// Re-exports
pub use app_context::AppContext;
pub use config::{AwsClients, ConfigError, TodoConfig};
pub use language_detector::{ComprehendLanguageDetector, LanguageDetectionError, LanguageDetector};
pub use logging::{init_logging, request_span};
pub use table_admin::{CreateTableOutcome, TableAdmin, TableAdminError};
pub use todo_repository::{DynamoTodoRepository, ItemPage, RepositoryError, TodoRepository};
pub use translator::{AwsTranslator, TranslationError, Translator};
