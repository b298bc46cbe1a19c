/// DynamoDBにお問い合わせレコードを保存するためのリポジトリ
///
/// テーブルの主キーは (id, submittedAt) の複合キー。
/// expiresAt（Unix秒）はテーブルのTTL属性として設定されている。
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::SubmissionRecord;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),
}

/// お問い合わせレコード永続化用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替えられるようにする。
/// 複数の呼び出しから同時に使用されるため`Send + Sync`を要求する。
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// レコードを新規アイテムとして保存
    ///
    /// 存在チェックや条件付き書き込みは行わない。
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`
    /// * 失敗時は`Err(RepositoryError)`
    async fn save(&self, record: &SubmissionRecord) -> Result<(), RepositoryError>;
}

/// SubmissionRepositoryのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoSubmissionRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// お問い合わせテーブル名
    table_name: String,
}

impl DynamoSubmissionRepository {
    /// 新しいDynamoSubmissionRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - お問い合わせテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// レコードをDynamoDBアイテムに変換
    ///
    /// オプションフィールドは値がある場合のみ属性として含める。
    pub fn to_item(record: &SubmissionRecord) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::from([
            ("id".to_string(), AttributeValue::S(record.id.clone())),
            ("submittedAt".to_string(), AttributeValue::S(record.submitted_at.clone())),
            ("expiresAt".to_string(), AttributeValue::N(record.expires_at.to_string())),
            ("firstName".to_string(), AttributeValue::S(record.first_name.clone())),
            ("lastName".to_string(), AttributeValue::S(record.last_name.clone())),
            ("email".to_string(), AttributeValue::S(record.email.clone())),
            ("subject".to_string(), AttributeValue::S(record.subject.clone())),
            ("message".to_string(), AttributeValue::S(record.message.clone())),
        ]);

        let optional_fields = [
            ("companyName", &record.company_name),
            ("companyWebsite", &record.company_website),
            ("phone", &record.phone),
        ];
        for (name, value) in optional_fields {
            if let Some(value) = value {
                item.insert(name.to_string(), AttributeValue::S(value.clone()));
            }
        }

        item
    }
}

#[async_trait]
impl SubmissionRepository for DynamoSubmissionRepository {
    async fn save(&self, record: &SubmissionRecord) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(record)))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn sample_record() -> SubmissionRecord {
        SubmissionRecord {
            id: "3f2504e0-4f89-41d3-9a0c-0305e82c3301".to_string(),
            submitted_at: "2024-03-15T09:30:45.123Z".to_string(),
            expires_at: 1718271045,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            company_name: None,
            company_website: None,
            email: "a@b.com".to_string(),
            phone: None,
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
        }
    }

    // ==================== アイテム変換 ====================

    #[test]
    fn test_to_item_contains_required_attributes() {
        let item = DynamoSubmissionRepository::to_item(&sample_record());

        assert_eq!(
            item.get("id"),
            Some(&AttributeValue::S("3f2504e0-4f89-41d3-9a0c-0305e82c3301".to_string()))
        );
        assert_eq!(
            item.get("submittedAt"),
            Some(&AttributeValue::S("2024-03-15T09:30:45.123Z".to_string()))
        );
        assert_eq!(item.get("firstName"), Some(&AttributeValue::S("A".to_string())));
        assert_eq!(item.get("lastName"), Some(&AttributeValue::S("B".to_string())));
        assert_eq!(item.get("email"), Some(&AttributeValue::S("a@b.com".to_string())));
        assert_eq!(item.get("subject"), Some(&AttributeValue::S("Hi".to_string())));
        assert_eq!(item.get("message"), Some(&AttributeValue::S("Hello".to_string())));
    }

    /// TTL属性は数値型で保存する
    #[test]
    fn test_to_item_stores_expires_at_as_number() {
        let item = DynamoSubmissionRepository::to_item(&sample_record());
        assert_eq!(item.get("expiresAt"), Some(&AttributeValue::N("1718271045".to_string())));
    }

    /// 未設定のオプションフィールドは属性ごと省略する
    #[test]
    fn test_to_item_omits_absent_optional_attributes() {
        let item = DynamoSubmissionRepository::to_item(&sample_record());

        assert_eq!(item.len(), 8);
        assert!(!item.contains_key("companyName"));
        assert!(!item.contains_key("companyWebsite"));
        assert!(!item.contains_key("phone"));
    }

    #[test]
    fn test_to_item_includes_present_optional_attributes() {
        let record = SubmissionRecord {
            company_name: Some("ACME".to_string()),
            company_website: Some("https://acme.example".to_string()),
            phone: Some("555-0100".to_string()),
            ..sample_record()
        };

        let item = DynamoSubmissionRepository::to_item(&record);

        assert_eq!(item.len(), 11);
        assert_eq!(item.get("companyName"), Some(&AttributeValue::S("ACME".to_string())));
        assert_eq!(
            item.get("companyWebsite"),
            Some(&AttributeValue::S("https://acme.example".to_string()))
        );
        assert_eq!(item.get("phone"), Some(&AttributeValue::S("555-0100".to_string())));
    }

    /// 書き込み先テーブル名は構築時の値を保持する
    #[tokio::test]
    async fn test_dynamo_repository_keeps_table_name() {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        let repository = DynamoSubmissionRepository::new(client, "ContactMessages".to_string());

        assert_eq!(repository.table_name(), "ContactMessages");
    }

    #[test]
    fn test_repository_error_write_error_display() {
        let error = RepositoryError::WriteError("ResourceNotFoundException".to_string());
        assert_eq!(error.to_string(), "Write error: ResourceNotFoundException");
    }

    // ==================== モックリポジトリ ====================

    /// ユニットテスト用のモックSubmissionRepository
    #[derive(Debug, Clone, Default)]
    pub struct MockSubmissionRepository {
        /// 保存されたレコード（保存順）
        records: Arc<Mutex<Vec<SubmissionRecord>>>,
        /// 次の操作で返すエラー（エラーパスのテスト用）
        next_error: Arc<Mutex<Option<RepositoryError>>>,
    }

    impl MockSubmissionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_next_error(&self, error: RepositoryError) {
            *self.next_error.lock().unwrap() = Some(error);
        }

        pub fn records(&self) -> Vec<SubmissionRecord> {
            self.records.lock().unwrap().clone()
        }

        pub fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        /// 複合キーでレコードを取得
        pub fn get(&self, id: &str, submitted_at: &str) -> Option<SubmissionRecord> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|record| record.key() == (id, submitted_at))
                .cloned()
        }

        fn take_error(&self) -> Option<RepositoryError> {
            self.next_error.lock().unwrap().take()
        }
    }

    #[async_trait]
    impl SubmissionRepository for MockSubmissionRepository {
        async fn save(&self, record: &SubmissionRecord) -> Result<(), RepositoryError> {
            if let Some(error) = self.take_error() {
                return Err(error);
            }

            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_mock_repo_save_success() {
        let repo = MockSubmissionRepository::new();

        repo.save(&sample_record()).await.unwrap();

        assert_eq!(repo.record_count(), 1);
        let stored = repo
            .get("3f2504e0-4f89-41d3-9a0c-0305e82c3301", "2024-03-15T09:30:45.123Z")
            .unwrap();
        assert_eq!(stored, sample_record());
    }

    #[tokio::test]
    async fn test_mock_repo_save_error() {
        let repo = MockSubmissionRepository::new();
        repo.set_next_error(RepositoryError::WriteError("DynamoDB unavailable".to_string()));

        let result = repo.save(&sample_record()).await;

        assert_eq!(
            result.unwrap_err(),
            RepositoryError::WriteError("DynamoDB unavailable".to_string())
        );
        assert_eq!(repo.record_count(), 0);
    }
}
