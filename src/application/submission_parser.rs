/// リクエストボディのパーサー
///
/// JSONボディをSubmissionInputに変換する。
/// キーは大文字小文字を区別せずに照合し、未知のキーは無視する。
use lambda_http::Body;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::SubmissionInput;

/// ボディのパースエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// ボディが存在しない、または空白のみ
    #[error("request body is empty")]
    EmptyBody,

    /// JSONとして解釈できない、オブジェクトでない、またはフィールドの型が不正
    #[error("failed to parse JSON: {0}")]
    InvalidJson(String),

    /// JSONリテラルnull
    #[error("payload is null")]
    NullPayload,
}

/// 小文字化したキーで受け取るための中間表現
#[derive(Debug, Deserialize)]
struct LowercasedInput {
    #[serde(rename = "firstname")]
    first_name: Option<String>,
    #[serde(rename = "lastname")]
    last_name: Option<String>,
    #[serde(rename = "companyname")]
    company_name: Option<String>,
    #[serde(rename = "companywebsite")]
    company_website: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

impl From<LowercasedInput> for SubmissionInput {
    fn from(input: LowercasedInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            company_name: input.company_name,
            company_website: input.company_website,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
        }
    }
}

/// お問い合わせフォームのボディパーサー
pub struct SubmissionParser;

impl SubmissionParser {
    /// Lambda HTTPボディからテキストを取り出す
    ///
    /// Binaryボディは UTF-8 としてデコードする。
    ///
    /// # 戻り値
    /// * `Ok(&str)` - 空白以外の文字を含むボディ
    /// * `Err(ParseError::EmptyBody)` - ボディなし、または空白のみ
    /// * `Err(ParseError::InvalidJson)` - UTF-8として不正なBinaryボディ
    pub fn body_text(body: &Body) -> Result<&str, ParseError> {
        let text = match body {
            Body::Empty => "",
            Body::Text(text) => text.as_str(),
            Body::Binary(bytes) => std::str::from_utf8(bytes)
                .map_err(|e| ParseError::InvalidJson(e.to_string()))?,
            #[allow(unreachable_patterns)]
            _ => "",
        };

        if text.trim().is_empty() {
            return Err(ParseError::EmptyBody);
        }

        Ok(text)
    }

    /// JSON文字列をパースしてSubmissionInputに変換
    ///
    /// # 例
    /// ```
    /// use contact_intake::application::SubmissionParser;
    ///
    /// let input = SubmissionParser::parse(r#"{"FIRSTNAME": "Ada"}"#).unwrap();
    /// assert_eq!(input.first_name.as_deref(), Some("Ada"));
    /// ```
    pub fn parse(body: &str) -> Result<SubmissionInput, ParseError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        let object = match value {
            Value::Null => return Err(ParseError::NullPayload),
            Value::Object(object) => object,
            other => {
                return Err(ParseError::InvalidJson(format!(
                    "expected a JSON object, found {}",
                    Self::type_name(&other)
                )));
            }
        };

        let input: LowercasedInput = serde_json::from_value(Value::Object(Self::lowercase_keys(object)))
            .map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        Ok(input.into())
    }

    /// トップレベルのキーを小文字化する
    ///
    /// 小文字化して同じになるキーが複数ある場合は、ドキュメント上で後に現れた値を採用する
    /// （serde_jsonのpreserve_orderによりMapは出現順を保持する）。
    fn lowercase_keys(object: Map<String, Value>) -> Map<String, Value> {
        object
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect()
    }

    fn type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
