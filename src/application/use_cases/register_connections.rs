//! # Register Connections Use Case
//!
//! 接続レコードをメタデータストアへ登録するユースケース

use std::sync::Arc;

use log::{info, warn};

use crate::domain::entities::connection::Connection;
use crate::domain::errors::{PersistenceError, RegistrationError};
use crate::domain::repositories::metadata_store::{MetadataSession, MetadataStore};

/// 登録結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// 登録された conn_id（登録順）
    pub registered: Vec<String>,
}

impl RegistrationSummary {
    pub fn count(&self) -> usize {
        self.registered.len()
    }
}

/// 接続登録ユースケース
///
/// レコードごとにセッションを開き、追加・確定して必ず解放する
pub struct RegisterConnectionsUseCase<S: MetadataStore> {
    store: Arc<S>,
}

impl<S: MetadataStore> RegisterConnectionsUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 接続レコードを順番に登録
    ///
    /// # Errors
    ///
    /// 最初に失敗したレコードで停止し、そのエラーを返す。
    /// それ以前に確定したレコードは残る。
    pub async fn execute(
        &self,
        connections: &[Connection],
    ) -> Result<RegistrationSummary, RegistrationError> {
        let mut summary = RegistrationSummary::default();

        for connection in connections {
            self.register_one(connection).await?;
            info!("Registered connection {}", connection.conn_id());
            summary.registered.push(connection.conn_id().to_string());
        }

        Ok(summary)
    }

    /// 1レコード分のスコープ付きセッション
    async fn register_one(&self, connection: &Connection) -> Result<(), PersistenceError> {
        let mut session = self.store.open_session().await?;

        let outcome = add_and_commit(&mut session, connection).await;

        if let Err(e) = &outcome {
            warn!(
                "Registration of {} failed, rolling back: {}",
                connection.conn_id(),
                e
            );
            if let Err(rollback_err) = session.rollback().await {
                warn!("Rollback failed: {}", rollback_err);
            }
        }

        session.close().await;

        outcome
    }
}

async fn add_and_commit(
    session: &mut Box<dyn MetadataSession>,
    connection: &Connection,
) -> Result<(), PersistenceError> {
    session.add(connection).await?;
    session.commit().await
}
