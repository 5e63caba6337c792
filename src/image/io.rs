//! Auxiliary output helpers.
//!
//! - `save_preview_png`: write a `PixelGrid` to an 8-bit grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! PGM input/output lives in [`crate::pgm`]; these helpers cover the
//! side artifacts the driver can emit next to the main output.
use super::{ImageView, PixelGrid};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Save a grid to a grayscale PNG, clamping values to [0, 1] before scaling.
pub fn save_preview_png(grid: &PixelGrid, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(grid.width() as u32, grid.height() as u32);
    for (y, row) in grid.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = (px.clamp(0.0, 1.0) * 255.0).round();
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
