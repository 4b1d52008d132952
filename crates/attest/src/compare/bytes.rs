use std::fs;
use std::path::Path;

use crate::compare::FileComparator;
use crate::error::{HarnessError, HarnessResult};

/// Byte-exact file comparison.
///
/// The strictest leaf strategy: both files have to be identical down to the
/// last byte. A mismatch names the first divergent offset and both lengths.
#[derive(Debug, Default)]
pub struct ByteFileComparator;

impl ByteFileComparator {
    pub fn new() -> Self {
        Self
    }
}

impl FileComparator for ByteFileComparator {
    fn assert_equal(&self, expected: &Path, actual: &Path) -> HarnessResult<()> {
        let expected_bytes = fs::read(expected)?;
        let actual_bytes = fs::read(actual)?;

        if expected_bytes == actual_bytes {
            return Ok(());
        }

        let offset = expected_bytes
            .iter()
            .zip(&actual_bytes)
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| expected_bytes.len().min(actual_bytes.len()));

        Err(HarnessError::ContentMismatch {
            path: actual.to_path_buf(),
            detail: format!(
                "differs from {} at byte offset {} (expected {} bytes, actual {} bytes)",
                expected.display(),
                offset,
                expected_bytes.len(),
                actual_bytes.len()
            ),
        })
    }
}
