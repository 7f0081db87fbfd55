//! Core translation engine module

pub mod cache;
pub mod client;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod i18n;
pub mod interpreter;
pub mod models;
pub mod registry;
pub mod transport;
