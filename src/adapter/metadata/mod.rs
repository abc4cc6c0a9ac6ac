//! Metadata Store Adapter
//!
//! オーケストレーターのメタデータDBとの統合

pub mod database_url;
pub mod sql_store;

pub use database_url::{Backend, DatabaseUrl};
pub use sql_store::SqlMetadataStore;
