//! Shared helpers for codec operations

pub mod validation;
