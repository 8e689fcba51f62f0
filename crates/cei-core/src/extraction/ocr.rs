use crate::error::CeiError;
use crate::extraction::OcrEngine;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Rasterization DPI. Below ~300 tesseract starts dropping the small
/// appendix typefaces.
const RASTER_DPI: u32 = 300;

/// OCR backend: pdftoppm (poppler) for rasterization, tesseract for text.
///
/// `--psm 6` (assume a uniform block of text) works best on the appendix
/// listings, which are column-aligned but not ruled.
pub struct TesseractOcr;

impl TesseractOcr {
    pub fn new() -> Self {
        TesseractOcr
    }

    /// Check if both pdftoppm and tesseract are available on the system.
    pub fn is_available() -> bool {
        let have = |cmd: &str, arg: &str| {
            Command::new(cmd)
                .arg(arg)
                .output()
                .map(|o| o.status.success() || !o.stderr.is_empty())
                .unwrap_or(false)
        };
        have("pdftoppm", "-v") && have("tesseract", "--version")
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn ocr_page_range(&self, pdf: &Path, first: u32, last: u32) -> Result<String, CeiError> {
        let staging = tempfile::tempdir().map_err(|e| CeiError::Extraction(e.to_string()))?;
        let prefix = staging.path().join("page");

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(RASTER_DPI.to_string())
            .arg("-f")
            .arg(first.to_string())
            .arg("-l")
            .arg(last.to_string())
            .arg(pdf)
            .arg(&prefix)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CeiError::PdftoppmNotFound
                } else {
                    CeiError::Extraction(format!("pdftoppm failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(CeiError::OcrToolFailed {
                tool: "pdftoppm",
                code,
                stderr,
            });
        }

        let mut images: Vec<PathBuf> = std::fs::read_dir(staging.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("png"))
                    .unwrap_or(false)
            })
            .collect();
        images.sort();
        info!(pages = images.len(), "running OCR on rasterized pages");

        let mut pages = Vec::new();
        for (i, image) in images.iter().enumerate() {
            let output = Command::new("tesseract")
                .arg(image)
                .arg("stdout")
                .arg("--psm")
                .arg("6")
                .output()
                .map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        CeiError::TesseractNotFound
                    } else {
                        CeiError::Extraction(format!("tesseract failed: {}", e))
                    }
                })?;

            // A single unreadable page should not sink the whole window.
            if !output.status.success() {
                debug!(page = i + 1, "tesseract failed on page, skipping");
                continue;
            }
            pages.push(String::from_utf8_lossy(&output.stdout).to_string());

            if (i + 1) % 10 == 0 {
                info!("OCR progress: {}/{} pages", i + 1, images.len());
            }
        }

        Ok(pages.join("\n"))
    }

    fn backend_name(&self) -> &str {
        "pdftoppm+tesseract"
    }
}
