//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod connection_builder;
