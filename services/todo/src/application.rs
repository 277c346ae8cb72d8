// アプリケーション層モジュール
pub mod request;
pub mod response;
pub mod todo_handler;
pub mod translate_handler;
pub mod translate_service;

// 再エクスポート
pub use request::RequestError;
pub use response::ApiResponse;
pub use todo_handler::TodoHandler;
pub use translate_handler::TranslateHandler;
pub use translate_service::{TranslateError, TranslateService};
