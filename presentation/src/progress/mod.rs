//! Build progress reporting

pub mod reporter;
