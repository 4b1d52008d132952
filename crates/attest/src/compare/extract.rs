use std::fs;
use std::io;
use std::path::Path;

use crate::compare::FileComparator;
use crate::error::{HarnessError, HarnessResult};

/// Compares structured documents by their extracted text.
///
/// For formats where the bytes on disk carry layout or metadata the test
/// doesn't care about (PDF, office documents), the caller supplies a closure
/// that extracts the plain text. Both extractions are then normalized —
/// whitespace runs collapsed to single spaces, case folded to uppercase —
/// and compared as a whole.
///
/// The default construction reads the files as UTF-8 text, which makes this
/// the case-insensitive, whitespace-insensitive strategy for plain text.
pub struct ExtractedTextComparator {
    extract: Box<dyn Fn(&Path) -> io::Result<String> + Send + Sync>,
}

impl ExtractedTextComparator {
    /// Build with a format-specific text extraction.
    pub fn new<F>(extract: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + Sync + 'static,
    {
        Self {
            extract: Box::new(extract),
        }
    }

    fn extracted_normalized(&self, file: &Path) -> HarnessResult<String> {
        let text = (self.extract)(file)?;
        Ok(normalize(&text))
    }
}

impl Default for ExtractedTextComparator {
    fn default() -> Self {
        Self::new(|file| fs::read_to_string(file))
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

impl FileComparator for ExtractedTextComparator {
    fn assert_equal(&self, expected: &Path, actual: &Path) -> HarnessResult<()> {
        let expected_text = self.extracted_normalized(expected)?;
        let actual_text = self.extracted_normalized(actual)?;

        if expected_text == actual_text {
            return Ok(());
        }

        Err(HarnessError::ContentMismatch {
            path: actual.to_path_buf(),
            detail: format!(
                "extracted text differs from {}: expected {:?}, got {:?}",
                expected.display(),
                expected_text,
                actual_text
            ),
        })
    }
}
