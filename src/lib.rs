//! Crop disease diagnosis assistant.
//!
//! A session holds one diagnosed crop image, the follow-up questions asked
//! about it, and the language both are displayed in. The language can be
//! switched at any time; every visible string is re-translated by the backend
//! and the switch is applied only if all of those translations succeed.

pub mod backend;
pub mod config;
pub mod history;
pub mod i18n;
pub mod image;
pub mod server;
pub mod session;
pub mod translation;
