//! Adapter Layer
//!
//! 外部システム（設定ファイル、環境変数、メタデータDB）との統合

pub mod config;
pub mod environment;
pub mod metadata;
