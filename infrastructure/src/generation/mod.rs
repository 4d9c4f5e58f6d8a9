//! Generation Service adapters
//!
//! | Adapter | Backend | Feature |
//! |---------|---------|---------|
//! | [`HttpGenerationService`] | OpenAI-compatible chat completions over `reqwest` | `http` |
//! | [`FixtureGenerationService`] | JSON fixture file keyed by shape name | always |

mod fixture;
#[cfg(feature = "http")]
mod http;
pub mod protocol;

pub use fixture::{FixtureError, FixtureGenerationService};
#[cfg(feature = "http")]
pub use http::{HttpGenerationError, HttpGenerationService};
