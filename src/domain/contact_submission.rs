/// お問い合わせフォームの入力と永続化レコード
///
/// リクエストボディから得た入力（SubmissionInput）と、
/// ID・送信日時・有効期限を付与したレコード（SubmissionRecord）を定義する。
use chrono::{DateTime, Duration, Utc};

/// レコードの保持期間（日数）
///
/// DynamoDBのTTL属性（expiresAt）の計算に使用する。
pub const RETENTION_DAYS: i64 = 90;

/// submittedAtの文字列フォーマット（yyyy-MM-ddTHH:mm:ss.fffZ）
pub const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// リクエストボディから取り出したフォーム入力
///
/// 欠落したフィールドとnullはどちらもNoneになる。
/// 必須かどうかの判定はSubmissionValidatorが行う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// DynamoDBに保存するお問い合わせレコード
///
/// 受付時に一度だけ生成され、以後変更されない。
/// (id, submitted_at) が複合主キーとなる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// 送信ID（UUID v4）
    pub id: String,
    /// 送信日時（UTC、SUBMITTED_AT_FORMAT形式）
    pub submitted_at: String,
    /// 有効期限（Unix秒）
    pub expires_at: i64,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl SubmissionRecord {
    /// 検証済みの入力からレコードを構築
    ///
    /// `now` はsubmittedAtとexpiresAtの両方の基準時刻となる。
    /// オプションフィールドは空白のみの場合も含めて未設定として扱い、レコードから除外する。
    /// 値はトリムせずそのまま保持する。
    ///
    /// # 引数
    /// * `input` - SubmissionValidatorで検証済みの入力
    /// * `id` - 新規に生成した送信ID
    /// * `now` - 受付時刻
    pub fn new(input: SubmissionInput, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            submitted_at: format_submitted_at(now),
            expires_at: calculate_expires_at(now),
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            company_name: non_blank(input.company_name),
            company_website: non_blank(input.company_website),
            email: input.email.unwrap_or_default(),
            phone: non_blank(input.phone),
            subject: input.subject.unwrap_or_default(),
            message: input.message.unwrap_or_default(),
        }
    }

    /// 複合主キー (id, submittedAt) を取得
    pub fn key(&self) -> (&str, &str) {
        (&self.id, &self.submitted_at)
    }
}

/// 受付時刻をsubmittedAtの文字列形式に変換
pub fn format_submitted_at(now: DateTime<Utc>) -> String {
    now.format(SUBMITTED_AT_FORMAT).to_string()
}

/// 有効期限を計算（受付時刻 + 90日、Unix秒）
pub fn calculate_expires_at(now: DateTime<Utc>) -> i64 {
    (now + Duration::days(RETENTION_DAYS)).timestamp()
}

/// 空白のみの値をNoneに畳み込む
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
