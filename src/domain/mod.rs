//! # Domain Layer
//!
//! このモジュールは接続登録の核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - データベースドライバやCLIに依存しない
//! - 永続化の詳細は trait の背後に隠す
//! - 純粋なビジネスロジック（レコードの組み立て）
//!
//! ## 構成要素
//!
//! - **entities**: 接続レコード（Connection, ConnectionType）
//! - **errors**: 登録処理のエラー分類
//! - **repositories**: MetadataStore / CredentialSource trait（インターフェース定義のみ）
//! - **services**: Domain Service（レコードビルダー）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
