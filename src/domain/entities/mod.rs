//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Connection**: オーケストレーターに登録する接続レコード
//! - **Credentials**: 環境変数から解決されたログイン情報

pub mod connection;
pub mod credentials;
