//! Chart serialization settings.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use netchart_core::{Error, ErrorKind, Result};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Settings applied when a chart is serialized.
///
/// Passed explicitly to `to_vega_lite`; there is no process-wide chart
/// state. Loadable from TOML:
///
/// ```toml
/// max_rows = 10000
/// width = 600
/// height = 400
/// consolidate_datasets = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Largest dataset allowed inline; `0` disables the check.
    pub max_rows: usize,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `$schema` URL written at the top level.
    pub schema: String,
    /// Hoist inline tables into a top-level `datasets` object.
    pub consolidate_datasets: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_rows: 5000,
            width: None,
            height: None,
            schema: VEGA_LITE_SCHEMA.to_string(),
            consolidate_datasets: true,
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            Error::new(ErrorKind::ConfigInvalid, e.message().to_string())
                .with_operation("config::from_toml_str")
                .set_source(e)
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::from(e).with_context("path", path.display().to_string()))?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| e.with_context("path", path.display().to_string()))?;
        debug!(path = %path.display(), ?config, "loaded chart config");
        Ok(config)
    }

    pub(crate) fn row_limit(&self) -> Option<usize> {
        (self.max_rows > 0).then_some(self.max_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChartConfig::from_toml_str("width = 640\nmax_rows = 0\n").unwrap();
        assert_eq!(config.width, Some(640));
        assert_eq!(config.row_limit(), None);
        assert_eq!(config.schema, VEGA_LITE_SCHEMA);
        assert!(config.consolidate_datasets);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ChartConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.toml");
        fs::write(&path, "height = 300\n").unwrap();

        let config = ChartConfig::from_path(&path).unwrap();
        assert_eq!(config.height, Some(300));
        assert_eq!(config.row_limit(), Some(5000));

        let err = ChartConfig::from_path(dir.path().join("missing.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
