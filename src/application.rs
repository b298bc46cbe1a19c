// アプリケーション層モジュール
pub mod intake_handler;
pub mod submission_parser;

// 再エクスポート
pub use intake_handler::{IntakeError, IntakeHandler, build_cors_headers};
pub use submission_parser::{ParseError, SubmissionParser};
