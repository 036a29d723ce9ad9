//! Image export of the rendered map.
//!
//! PNG and JPEG are written as requested. PDF has no encoder here, so it
//! writes a PNG and hands back a notice for the user. The color space
//! choice is recorded but never applied.

use crate::canvas::Canvas;
use crate::renderer::{self, RenderOptions};
use anyhow::{Context, Result};
use gridmapper_core::ValidationError;
use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Notice returned when a PDF export falls back to PNG.
pub const PDF_NOTICE: &str = "PDF export will convert the canvas to an image. For best results, \
use PNG format and convert to PDF using external tools.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ValidationError::UnknownExportFormat(s.to_string())),
        }
    }
}

/// Advisory only; no conversion is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Rgb,
    Cmyk,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub color_space: ColorSpace,
    pub dir: PathBuf,
    pub jpeg_quality: u8,
}

impl ExportOptions {
    pub fn new(format: ExportFormat, dir: impl Into<PathBuf>) -> Self {
        Self {
            format,
            color_space: ColorSpace::Rgb,
            dir: dir.into(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// What was actually written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub written_format: ExportFormat,
    pub notice: Option<String>,
}

/// `{name}.{ext}`, with path separators in the name replaced.
pub fn file_name(name: &str, format: ExportFormat) -> String {
    let stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.{}", stem, format.extension())
}

/// Render `canvas` and write it to `options.dir`.
pub fn export(canvas: &Canvas, name: &str, options: &ExportOptions) -> Result<ExportReport> {
    let (written_format, notice) = match options.format {
        ExportFormat::Pdf => (ExportFormat::Png, Some(PDF_NOTICE.to_string())),
        other => (other, None),
    };

    fs::create_dir_all(&options.dir)
        .with_context(|| format!("Failed to create export directory {}", options.dir.display()))?;
    let path = options.dir.join(file_name(name, written_format));

    let image = renderer::render_canvas(canvas, RenderOptions::export());
    match written_format {
        ExportFormat::Jpeg => write_jpeg(&image, &path, options.jpeg_quality)?,
        _ => image
            .save_with_format(&path, ImageFormat::Png)
            .context("Failed to write PNG export")?,
    }

    info!(
        path = %path.display(),
        format = ?written_format,
        color_space = ?options.color_space,
        "exported map"
    );
    Ok(ExportReport {
        path,
        written_format,
        notice,
    })
}

fn write_jpeg(image: &image::RgbImage, path: &Path, quality: u8) -> Result<()> {
    let file = File::create(path).context("Failed to create JPEG export")?;
    let mut writer = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100))
        .encode_image(image)
        .context("Failed to encode JPEG export")?;
    Ok(())
}
