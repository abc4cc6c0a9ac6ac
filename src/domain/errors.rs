//! # Registration Errors
//!
//! 接続登録で発生しうるエラーの分類

use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 接続登録のエラー
///
/// どのエラーもローカルでは回復せず、そのまま実行を終了させる
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("configuration file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read configuration file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("environment variable `{variable}` (config key `{key}`) is not set")]
    MissingCredential { key: String, variable: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// メタデータストアへの永続化エラー
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("connection `{conn_id}` already exists in the metadata store")]
    DuplicateConnection { conn_id: String },

    #[error("invalid metadata database url: {0}")]
    InvalidDatabaseUrl(String),

    #[error("metadata store failure: {context}")]
    Store {
        context: String,
        #[source]
        source: BoxError,
    },
}

impl PersistenceError {
    /// 任意のドライバエラーを `Store` としてラップする
    pub fn store(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateConnection { .. })
    }
}

impl RegistrationError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Persistence(e) if e.is_duplicate())
    }
}
