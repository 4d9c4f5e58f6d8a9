//! Core domain concepts shared across all subdomains.
//!
//! - [`requirement::Requirement`]: a validated build requirement
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod requirement;
