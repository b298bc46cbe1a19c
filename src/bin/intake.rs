/// お問い合わせ受付HTTP Lambdaエントリポイント
///
/// API Gateway経由のPOSTリクエストを受け取り、
/// フォーム内容を検証してDynamoDBに保存する。
use std::sync::Arc;

use contact_intake::application::IntakeHandler;
use contact_intake::infrastructure::{DynamoSubmissionRepository, IntakeConfig, init_logging};
use lambda_http::{Error, Request, run, service_fn};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // コールドスタート時に一度だけ設定とクライアントを構築
    let config = IntakeConfig::from_env().await;
    let repository =
        DynamoSubmissionRepository::new(config.client().clone(), config.table_name().to_string());
    info!(table_name = repository.table_name(), "お問い合わせ受付Lambda関数を初期化");

    let handler = Arc::new(IntakeHandler::new(repository));

    run(service_fn(move |request: Request| {
        let handler = Arc::clone(&handler);
        async move { Ok::<_, Error>(handler.handle(&request).await) }
    }))
    .await
}
