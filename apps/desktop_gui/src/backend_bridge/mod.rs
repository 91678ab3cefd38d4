//! Bridge between the UI thread and the worker that owns the HTTP client.

pub mod commands;
pub mod runtime;
