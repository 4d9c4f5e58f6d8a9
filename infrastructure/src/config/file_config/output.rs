//! `[output]` section: how the finished build is printed

use buildcrew_domain::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report printed after a successful build; `None` leaves it to the CLI
    pub format: Option<OutputFormat>,
    /// Colored summary, failure report and progress bars
    pub color: bool,
}

impl FileOutputConfig {
    /// Pick the report format: `--output` wins over the file, then the summary
    pub fn resolve_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.format).unwrap_or_default()
    }
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}
