//! PDF text extraction

use crate::error::{Result, RfpLensError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extracts text and titles from RFP PDFs
pub struct PdfExtractor;

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from PDF bytes
    pub fn extract_text(&self, bytes: &[u8], name: &str) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            RfpLensError::Parse(format!("Failed to extract text from PDF {}: {}", name, e))
        })?;

        if text.trim().is_empty() {
            return Err(RfpLensError::Parse(format!(
                "PDF {} contains no extractable text (may be image-based)",
                name
            )));
        }

        Ok(text)
    }

    /// Extract text from a PDF file on disk
    pub fn extract_text_from_path(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| {
            RfpLensError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read PDF file {:?}: {}", path, e),
            ))
        })?;
        self.extract_text(&bytes, &path.to_string_lossy())
    }

    /// Extract title from PDF text content, falling back to the filename
    pub fn extract_title(&self, content: &str, filename: &str) -> String {
        let first_line = content
            .lines()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
            .unwrap_or("");

        if !first_line.is_empty() && first_line.len() < 200 {
            return first_line.to_string();
        }

        Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.replace('_', " ").replace('-', " "))
            .unwrap_or_else(|| "Untitled PDF".to_string())
    }

    /// Scan directory for PDF files matching pattern
    pub fn scan_directory(&self, base_path: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        let glob_pattern = glob::Pattern::new(pattern)?;
        let mut pdf_files = Vec::new();

        for entry in WalkDir::new(base_path)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Some(ext) = path.extension() {
                if ext.eq_ignore_ascii_case("pdf") {
                    if let Ok(relative) = path.strip_prefix(base_path) {
                        if glob_pattern.matches(&relative.to_string_lossy()) {
                            pdf_files.push(path.to_path_buf());
                        }
                    }
                }
            }
        }

        pdf_files.sort();
        Ok(pdf_files)
    }
}

/// Reject filenames without a .pdf extension
pub fn validate_pdf_filename(filename: &str) -> Result<()> {
    let is_pdf = Path::new(filename)
        .extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        Ok(())
    } else {
        Err(RfpLensError::InvalidInput(format!(
            "Only PDF files are allowed, got: {}",
            filename
        )))
    }
}
