/// ログ基盤モジュール
///
/// CloudWatch Logs向けにJSON形式の構造化ログを出力する。
/// ログレベルは`RUST_LOG`で指定し、未指定時はinfo。
use std::sync::Once;

use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 複数回呼び出しても最初の1回だけ初期化する。
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(true);

        // テストなどで既に登録済みの場合は無視する
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
}

/// 1回のLambda呼び出しを表すspanを作成する
///
/// span内のログには`route`と`request_id`が付与される。
pub fn request_span(route: &str, request_id: &str) -> Span {
    tracing::info_span!("request", route = %route, request_id = %request_id)
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_init_logging_idempotent() {
        init_test_logging();
        init_logging();
        init_logging();
    }

    /// 出力をメモリに溜めるWriter
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_request_span_fields_in_json_output() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_writer(move || writer.clone());
        let subscriber = tracing_subscriber::registry().with(json_layer);

        tracing::subscriber::with_default(subscriber, || {
            let span = request_span("translate", "req-123");
            let _guard = span.enter();
            tracing::info!(id = "todo-1", language = "it", "翻訳リクエスト");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();

        assert_eq!(line["span"]["name"], "request");
        assert_eq!(line["span"]["route"], "translate");
        assert_eq!(line["span"]["request_id"], "req-123");
        assert_eq!(line["id"], "todo-1");
    }
}
