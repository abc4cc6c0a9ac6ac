//! # Connseed
//!
//! MySQL と BigQuery の接続レコードを Airflow のメタデータストアに登録するツール
//!
//! クリーンアーキテクチャの4層で構成されています：
//!
//! - **Domain層**: 接続レコードとエラー分類、Repository trait
//! - **Application層**: 認証情報の解決と登録のユースケース
//! - **Adapter層**: 設定ファイル、環境変数、メタデータDB（sqlx）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
