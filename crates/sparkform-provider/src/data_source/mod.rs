//! Read-only data sources.

pub mod webhook;
