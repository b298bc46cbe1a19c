/// お問い合わせ受付APIのレスポンスボディ
///
/// 成功時: `{"success": true, "message": ..., "submissionId": ..., "submittedAt": ...}`
/// 失敗時: `{"success": false, "error": ...}`
use serde::Serialize;

/// 成功時の確認メッセージ
pub const SUCCESS_MESSAGE: &str = "Thank you for your message. We will get back to you soon.";

/// x-api-keyヘッダー欠落時のエラーメッセージ
pub const API_KEY_REQUIRED: &str = "API key required";

/// ボディが空の場合のエラーメッセージ
pub const REQUEST_BODY_REQUIRED: &str = "Request body is required";

/// ボディがJSONとして解釈できない場合のエラーメッセージ
pub const INVALID_JSON_FORMAT: &str = "Invalid JSON format";

/// ボディがnullの場合のエラーメッセージ
pub const INVALID_CONTACT_FORM_DATA: &str = "Invalid contact form data";

/// 内部エラー時のエラーメッセージ（原因は含めない）
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// レスポンスボディ
///
/// 該当しないフィールドはシリアライズ時に省略する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponseBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntakeResponseBody {
    /// 受付成功のボディを作成
    pub fn accepted(submission_id: impl Into<String>, submitted_at: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
            submission_id: Some(submission_id.into()),
            submitted_at: Some(submitted_at.into()),
            error: None,
        }
    }

    /// エラーのボディを作成
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            submission_id: None,
            submitted_at: None,
            error: Some(message.into()),
        }
    }

    /// JSON文字列にシリアライズ
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"success":false,"error":"{}"}}"#, INTERNAL_SERVER_ERROR)
        })
    }
}
