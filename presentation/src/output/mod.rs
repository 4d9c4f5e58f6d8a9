//! Output formatting for build results

pub mod console;
