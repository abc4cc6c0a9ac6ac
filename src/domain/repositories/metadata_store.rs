//! # Metadata Store Trait
//!
//! オーケストレーターのメタデータストアへの書き込みを抽象化

use async_trait::async_trait;

use crate::domain::entities::connection::Connection;
use crate::domain::errors::PersistenceError;

/// メタデータストアのセッション
///
/// 1つの作業単位に束縛されたリソース。
/// 呼び出し側は結果にかかわらず `close` を1回だけ呼ぶ。
#[async_trait]
pub trait MetadataSession: Send {
    /// 接続レコードを追加する（commit まで永続化されない）
    ///
    /// # Errors
    ///
    /// 一意キー違反の場合は `PersistenceError::DuplicateConnection` を返す
    async fn add(&mut self, connection: &Connection) -> Result<(), PersistenceError>;

    /// 追加したレコードを確定する
    async fn commit(&mut self) -> Result<(), PersistenceError>;

    /// 未確定のレコードを破棄する
    async fn rollback(&mut self) -> Result<(), PersistenceError>;

    /// セッションを解放する
    ///
    /// 未確定の変更が残っていれば破棄する
    async fn close(&mut self);
}

/// メタデータストア
///
/// セッションの生成を担当するリポジトリ
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// 新しいセッションを開く
    ///
    /// # Errors
    ///
    /// ストアに接続できない場合にエラーを返す
    async fn open_session(&self) -> Result<Box<dyn MetadataSession>, PersistenceError>;
}
