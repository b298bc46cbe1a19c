/// お問い合わせ受付ハンドラー
///
/// API Gateway経由のPOSTリクエストを1件処理する。
/// 検証 → レコード構築 → DynamoDB保存 → レスポンス生成を直列に行い、
/// 途中の失敗は全てここで構造化されたエラーレスポンスに変換する。
use chrono::Utc;
use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE, HeaderMap, HeaderValue,
};
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, RequestExt, Response};
use thiserror::Error;
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::application::{ParseError, SubmissionParser};
use crate::domain::intake_response::{
    API_KEY_REQUIRED, INTERNAL_SERVER_ERROR, INVALID_CONTACT_FORM_DATA, INVALID_JSON_FORMAT,
    REQUEST_BODY_REQUIRED,
};
use crate::domain::{
    IntakeResponseBody, SubmissionRecord, SubmissionValidator, ValidationErrors,
};
use crate::infrastructure::logging::request_span;
use crate::infrastructure::{RepositoryError, SubmissionRepository};

/// API Gatewayが検証するAPIキーのヘッダー名
pub const API_KEY_HEADER: &str = "x-api-key";

/// 許可するリクエストヘッダー
pub const CORS_ALLOW_HEADERS: &str =
    "Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token";

/// 許可するメソッド
pub const CORS_ALLOW_METHODS: &str = "POST, OPTIONS";

/// 受付処理のエラー型
#[derive(Debug, Error)]
pub enum IntakeError {
    /// x-api-keyヘッダーが存在しない
    #[error("missing x-api-key header")]
    MissingApiKey,

    /// ボディが空
    #[error("request body is empty")]
    EmptyBody,

    /// ボディがJSONとして解釈できない
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// ボディがnull
    #[error("request body is null")]
    InvalidPayload,

    /// 1件以上の検証ルールに失敗
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// DynamoDBへの保存に失敗
    #[error("failed to persist submission: {0}")]
    Persistence(#[from] RepositoryError),
}

impl From<ParseError> for IntakeError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::EmptyBody => IntakeError::EmptyBody,
            ParseError::InvalidJson(reason) => IntakeError::MalformedBody(reason),
            ParseError::NullPayload => IntakeError::InvalidPayload,
        }
    }
}

impl IntakeError {
    /// レスポンスのHTTPステータス
    pub fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::MissingApiKey => StatusCode::UNAUTHORIZED,
            IntakeError::EmptyBody
            | IntakeError::MalformedBody(_)
            | IntakeError::InvalidPayload
            | IntakeError::Validation(_) => StatusCode::BAD_REQUEST,
            IntakeError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 呼び出し元に返すエラーメッセージ
    ///
    /// 保存失敗の原因（DynamoDBのエラー内容）は含めない。
    pub fn client_message(&self) -> String {
        match self {
            IntakeError::MissingApiKey => API_KEY_REQUIRED.to_string(),
            IntakeError::EmptyBody => REQUEST_BODY_REQUIRED.to_string(),
            IntakeError::MalformedBody(_) => INVALID_JSON_FORMAT.to_string(),
            IntakeError::InvalidPayload => INVALID_CONTACT_FORM_DATA.to_string(),
            IntakeError::Validation(errors) => errors.to_string(),
            IntakeError::Persistence(_) => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

/// お問い合わせ受付ハンドラー
///
/// 呼び出し間で状態を持たない。リポジトリはコールドスタート時に一度だけ構築し、
/// 並行する呼び出しで共有する。
pub struct IntakeHandler<R>
where
    R: SubmissionRepository,
{
    /// お問い合わせリポジトリ
    repository: R,
}

impl<R> IntakeHandler<R>
where
    R: SubmissionRepository,
{
    /// 新しいIntakeHandlerを作成
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// HTTPリクエストを処理してレスポンスを生成
    ///
    /// # 処理フロー
    /// 1. OPTIONS（CORSプリフライト）はボディなしの200を即時返却
    /// 2. x-api-keyヘッダーの存在確認
    /// 3. ボディのパースとバリデーション
    /// 4. ID・送信日時・有効期限を付与してDynamoDBに保存
    /// 5. 成功レスポンス、または失敗種別に応じたエラーレスポンスを返却
    ///
    /// 全てのレスポンスにCORSヘッダーを付与する。
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let request_id = request
            .lambda_context_ref()
            .map(|ctx| ctx.request_id.clone())
            .unwrap_or_else(|| "unknown".to_string());

        if request.method() == Method::OPTIONS {
            info!(request_id = %request_id, "CORSプリフライトリクエスト受信");
            return Self::preflight_response();
        }

        let span = request_span(&request_id);

        async {
            info!(method = %request.method(), "お問い合わせリクエスト受信");

            match self.process(request).await {
                Ok(record) => {
                    info!(
                        submission_id = %record.id,
                        submitted_at = %record.submitted_at,
                        "お問い合わせを保存"
                    );
                    Self::json_response(
                        StatusCode::OK,
                        &IntakeResponseBody::accepted(record.id, record.submitted_at),
                    )
                }
                Err(err) => {
                    match &err {
                        IntakeError::Persistence(cause) => {
                            error!(error = %cause, "お問い合わせの保存に失敗");
                        }
                        other => {
                            warn!(reason = %other, "リクエストを拒否");
                        }
                    }
                    Self::json_response(
                        err.status_code(),
                        &IntakeResponseBody::error(err.client_message()),
                    )
                }
            }
        }
        .instrument(span)
        .await
    }

    /// 検証から保存までを行い、保存したレコードを返す
    async fn process(&self, request: &Request) -> Result<SubmissionRecord, IntakeError> {
        // APIキーの検証自体はAPI Gatewayが行う。ここでは存在のみ確認する
        if !request.headers().contains_key(API_KEY_HEADER) {
            return Err(IntakeError::MissingApiKey);
        }

        let body = SubmissionParser::body_text(request.body())?;
        let input = SubmissionParser::parse(body)?;
        SubmissionValidator::validate(&input)?;

        let record = SubmissionRecord::new(input, Uuid::new_v4().to_string(), Utc::now());
        self.repository.save(&record).await?;

        Ok(record)
    }

    /// JSONボディとCORSヘッダーを持つレスポンスを生成
    fn json_response(status: StatusCode, body: &IntakeResponseBody) -> Response<Body> {
        let mut response = Response::new(Body::Text(body.to_json()));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        *headers = build_cors_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        response
    }

    /// CORSプリフライトへのレスポンス
    fn preflight_response() -> Response<Body> {
        let mut response = Response::new(Body::Empty);
        *response.headers_mut() = build_cors_headers();
        response
    }
}

/// CORSヘッダーを生成
///
/// - Access-Control-Allow-Origin: *
/// - Access-Control-Allow-Headers: Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token
/// - Access-Control-Allow-Methods: POST, OPTIONS
pub fn build_cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );

    headers
}
