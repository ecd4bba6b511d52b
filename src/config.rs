//! Report configuration
//!
//! One explicit value threaded through build and render. Nothing here is
//! read from process globals; the CLI constructs a config and passes it down.

use serde::{Deserialize, Serialize};

use crate::chart::ChartTheme;

/// Settings for report generation
///
/// # Example
/// ```
/// use lepus::config::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.alpha, 0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Significance level compared against p-values when the narrative
    /// phrases a result as significant or not. Common choices: 0.05
    /// (default), 0.01 (stricter), 0.10 (looser).
    pub alpha: f64,

    /// Dimensions, palette, and typography for the three report figures
    pub theme: ChartTheme,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05, // 95% confidence
            theme: ChartTheme::default(),
        }
    }
}

impl ReportConfig {
    /// Default configuration with a caller-chosen significance level
    pub fn with_alpha(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(format!(
                "alpha must be strictly between 0 and 1, got {}",
                self.alpha
            ));
        }
        self.theme.validate()
    }
}
