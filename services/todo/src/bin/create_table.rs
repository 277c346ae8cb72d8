/// ToDoテーブル作成ツール
///
/// DynamoDB Localや検証環境に`id`(S)をパーティションキーとするテーブルを作成し、
/// ACTIVEになるまで待機する。既に存在する場合はそのまま成功とする。
///
/// # 環境変数
/// - DYNAMODB_TABLE: テーブル名（`--table-name`未指定時に使用）
/// - ENDPOINT_OVERRIDE: エンドポイント（`--endpoint-url`未指定時に使用）
///
/// # ローカル実行
/// ```bash
/// cargo run --bin create_table -- --table-name todoTable --endpoint-url http://localhost:8000
/// ```
use clap::Parser;
use todo::infrastructure::config::ENDPOINT_OVERRIDE_ENV;
use todo::infrastructure::{init_logging, AwsClients, CreateTableOutcome, TableAdmin, TodoConfig};
use tracing::{error, info};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[command(name = "create_table")]
#[command(about = "ToDoアイテム用のDynamoDBテーブルを作成")]
struct CliArgs {
    /// テーブル名
    /// 環境変数DYNAMODB_TABLEより優先される
    #[arg(long, short = 't')]
    table_name: Option<String>,

    /// エンドポイントURL
    /// 環境変数ENDPOINT_OVERRIDEより優先される
    #[arg(long, short = 'e')]
    endpoint_url: Option<String>,

    /// 読み込み/書き込みキャパシティユニット
    #[arg(long, short = 'c', default_value_t = 1)]
    capacity_units: i64,

    /// ACTIVE待機のタイムアウト秒数
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

/// 引数と環境変数から設定を組み立てる
fn build_config(args: &CliArgs) -> Result<TodoConfig, Box<dyn std::error::Error>> {
    let table_name = match &args.table_name {
        Some(table_name) => table_name.clone(),
        None => TodoConfig::from_env()?.table_name().to_string(),
    };

    let endpoint_override = args
        .endpoint_url
        .clone()
        .or_else(|| std::env::var(ENDPOINT_OVERRIDE_ENV).ok())
        .filter(|v| !v.is_empty());

    Ok(TodoConfig::new(table_name, endpoint_override)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args = CliArgs::parse();
    let config = build_config(&args)?;

    info!(
        table_name = %config.table_name(),
        endpoint_override = ?config.endpoint_override(),
        "テーブル作成ツール開始"
    );

    let clients = AwsClients::from_config(&config).await;
    let admin = TableAdmin::new(clients.dynamodb).with_timeout(args.timeout);

    match admin
        .create_table(config.table_name(), args.capacity_units)
        .await
    {
        Ok(CreateTableOutcome::Created) => {
            info!(table_name = %config.table_name(), "テーブル作成完了");
            Ok(())
        }
        Ok(CreateTableOutcome::AlreadyExists) => {
            info!(table_name = %config.table_name(), "既存テーブルを使用");
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "テーブル作成失敗");
            Err(err.into())
        }
    }
}
