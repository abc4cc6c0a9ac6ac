//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ResolveCredentialsUseCase**: 環境変数からログイン情報を解決
//! - **RegisterConnectionsUseCase**: 接続レコードをメタデータストアへ登録

pub mod register_connections;
pub mod resolve_credentials;
