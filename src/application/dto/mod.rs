//! # Data Transfer Objects

pub mod connection_settings;
