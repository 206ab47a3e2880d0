//! Text extraction from business documents.
//!
//! Turns PDF and plain-text files into the raw text consumed by the
//! clause extractor. DOCX is recognized but no codec is wired in, so it
//! degrades to a per-document extraction error instead of aborting a
//! batch.

use std::fs;
use std::path::{Path, PathBuf};

use doccheck_types::{IngestError, TextSource};
use tracing::warn;

/// File extensions the extractor recognizes.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

/// Extracted text for one file in a batch.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub file_path: PathBuf,
    pub filename: String,
    pub text: String,
}

/// Per-file failure in a batch; the rest of the batch proceeds.
#[derive(Debug)]
pub struct FailedExtraction {
    pub file_path: PathBuf,
    pub filename: String,
    pub error: IngestError,
}

#[derive(Debug, Default)]
pub struct BatchExtraction {
    pub successful: Vec<ExtractedDocument>,
    pub failed: Vec<FailedExtraction>,
}

/// Extracts plain text from supported document formats.
#[derive(Debug, Default)]
pub struct DocumentExtractor;

impl DocumentExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn is_supported(path: &Path) -> bool {
        extension_of(path)
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Extract text from a single document.
    pub fn extract_text(&self, path: &Path) -> Result<String, IngestError> {
        if !path.exists() {
            return Err(IngestError::NotFound(path.to_path_buf()));
        }

        let ext = extension_of(path)
            .ok_or_else(|| IngestError::UnsupportedFormat(display_extension(path)))?;

        match ext.as_str() {
            "pdf" => self.extract_pdf(path),
            "txt" => self.extract_txt(path),
            "docx" | "doc" => Err(IngestError::Extraction {
                path: path.to_path_buf(),
                reason: "no DOCX codec available".to_string(),
            }),
            _ => Err(IngestError::UnsupportedFormat(format!(".{ext}"))),
        }
    }

    /// Extract text from several documents, isolating per-file failures.
    pub fn batch(&self, paths: &[PathBuf]) -> BatchExtraction {
        let mut result = BatchExtraction::default();

        for path in paths {
            let filename = filename_of(path);
            match self.extract_text(path) {
                Ok(text) => result.successful.push(ExtractedDocument {
                    file_path: path.clone(),
                    filename,
                    text,
                }),
                Err(error) => {
                    warn!(file = %path.display(), %error, "text extraction failed");
                    result.failed.push(FailedExtraction {
                        file_path: path.clone(),
                        filename,
                        error,
                    });
                }
            }
        }

        result
    }

    fn extract_pdf(&self, path: &Path) -> Result<String, IngestError> {
        let text = pdf_extract::extract_text(path).map_err(|e| IngestError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if text.trim().is_empty() {
            return Err(IngestError::Extraction {
                path: path.to_path_buf(),
                reason: "no text could be extracted from PDF".to_string(),
            });
        }

        Ok(text)
    }

    fn extract_txt(&self, path: &Path) -> Result<String, IngestError> {
        let bytes = fs::read(path).map_err(|e| IngestError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => {
                // Latin-1 fallback: every byte maps to the same code point.
                warn!(file = %path.display(), "text file is not UTF-8, decoding as Latin-1");
                Ok(err.as_bytes().iter().map(|&b| b as char).collect())
            }
        }
    }
}

impl TextSource for DocumentExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, IngestError> {
        DocumentExtractor::extract_text(self, path)
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn display_extension(path: &Path) -> String {
    extension_of(path)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| "<none>".to_string())
}

fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("doccheck-{}-{}", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let extractor = DocumentExtractor::new();
        let err = extractor
            .extract_text(Path::new("/nonexistent/contract.pdf"))
            .unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let extractor = DocumentExtractor::new();
        let path = temp_file("contract.xyz", b"data");
        let err = extractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(_)));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_reads_utf8_text_file() {
        let extractor = DocumentExtractor::new();
        let path = temp_file("contract-utf8.txt", "30 days notice".as_bytes());
        assert_eq!(extractor.extract_text(&path).unwrap(), "30 days notice");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_latin1_fallback() {
        let extractor = DocumentExtractor::new();
        // "résumé" in Latin-1
        let path = temp_file("contract-latin1.txt", b"r\xe9sum\xe9");
        assert_eq!(extractor.extract_text(&path).unwrap(), "résumé");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_docx_degrades_to_extraction_error() {
        let extractor = DocumentExtractor::new();
        let path = temp_file("contract.docx", b"PK");
        let err = extractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, IngestError::Extraction { .. }));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_batch_isolates_failures() {
        let extractor = DocumentExtractor::new();
        let good = temp_file("batch-good.txt", b"salary of $75,000");
        let missing = PathBuf::from("/nonexistent/batch-bad.txt");

        let result = extractor.batch(&[good.clone(), missing]);
        assert_eq!(result.successful.len(), 1);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.successful[0].filename, filename_of(&good));
        fs::remove_file(&good).ok();
    }
}
