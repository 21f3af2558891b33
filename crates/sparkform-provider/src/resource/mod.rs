//! Managed resource types.

pub mod webhook;
