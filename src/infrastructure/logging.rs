/// ログ基盤モジュール
///
/// お問い合わせ受付Lambdaの構造化ログ設定を提供する。
/// 1件の受付処理は`intake`スパンで囲み、そのスパンの`request_id`を
/// 各ログ行の`span`フィールドに出力する。CloudWatch Logs Insightsでは
/// `span.request_id`で1リクエスト分のログ（受信・拒否理由・保存結果）を抽出できる。
use std::sync::Once;

use tracing::{Span, info_span};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// 受付処理1件分のスパン名
pub const REQUEST_SPAN_NAME: &str = "intake";

/// 受付処理1件分のスパンを作成
///
/// `request_id`はLambdaコンテキストのリクエストID（Lambda外では"unknown"）。
pub fn request_span(request_id: &str) -> Span {
    info_span!("intake", request_id = %request_id)
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 環境変数`RUST_LOG`でフィルタリングする（未設定時はinfo）。
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
///
/// # 使用例
/// ```ignore
/// use contact_intake::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            // request_idを各行に載せるため現在のスパンのみ出力する
            .with_current_span(true)
            .with_span_list(false);

        // テスト等で既に初期化済みの場合は何もしない
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
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
