//! JSON configuration for the `stencil-blur` driver.
//!
//! Every field is optional; missing fields fall back to the defaults below.
//! Command-line arguments override values loaded from the file.
use crate::pgm::{EncodeOptions, Quantization, PGM_OUTPUT_MAX};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "in.pgm";
pub const DEFAULT_OUTPUT: &str = "out.pgm";
pub const DEFAULT_PASSES: usize = 1000;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlurToolConfig {
    pub input: PathBuf,
    /// Number of stencil passes.
    pub passes: usize,
    pub output: PathBuf,
    /// Maxval of the written PGM.
    pub output_max_value: u16,
    pub quantization: Quantization,
    /// Optional 8-bit PNG preview of the result.
    pub preview_png: Option<PathBuf>,
    /// Optional JSON run report.
    pub report_json: Option<PathBuf>,
}

impl Default for BlurToolConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            passes: DEFAULT_PASSES,
            output: PathBuf::from(DEFAULT_OUTPUT),
            output_max_value: PGM_OUTPUT_MAX,
            quantization: Quantization::Round,
            preview_png: None,
            report_json: None,
        }
    }
}

impl BlurToolConfig {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new(self.output_max_value).with_quantization(self.quantization)
    }
}

pub fn load_config(path: &Path) -> Result<BlurToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<BlurToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
