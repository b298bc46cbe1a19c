/// DynamoDB接続設定
///
/// コールドスタート時に一度だけ読み込み、全ての呼び出しで共有する。
use aws_sdk_dynamodb::Client as DynamoDbClient;

/// テーブル名を指定する環境変数
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// 環境変数が未設定の場合のテーブル名
pub const DEFAULT_TABLE_NAME: &str = "ContactMessages";

/// テーブル名とクライアントを持つ設定
///
/// テーブル名は`TABLE_NAME`環境変数で設定する（未設定または空の場合は`ContactMessages`）。
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// お問い合わせテーブル名
    table_name: String,
}

impl IntakeConfig {
    /// 環境からAWS設定を読み込み、環境変数からテーブル名を読み取って新しいIntakeConfigを作成
    ///
    /// 環境変数:
    /// - AWS認証情報: aws-configにより自動読み込み
    /// - TABLE_NAME: お問い合わせ用DynamoDBテーブル名
    pub async fn from_env() -> Self {
        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        Self {
            client: DynamoDbClient::new(&aws_config),
            table_name: table_name_from_env(),
        }
    }

    /// 明示的な値で新しいIntakeConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// 環境変数からテーブル名を読み込む
pub fn table_name_from_env() -> String {
    std::env::var(TABLE_NAME_ENV)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string())
}
