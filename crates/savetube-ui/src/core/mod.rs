//! Core, DOM-free primitives and helpers for the Web UI.
pub mod disposition;
pub mod download;
pub mod metadata;
pub mod nav;
pub mod prefs;
pub mod progress;
pub mod sse;
pub mod store;
