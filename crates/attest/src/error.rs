use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while executing an integration test.
///
/// The variants fall into three channels:
///
/// * mismatches (`ContentMismatch`, `StructuralMismatch`) — the produced
///   result differs from its counterpart; fixable by the test author,
/// * usage errors (`KindMismatch`, `Usage`) — the test fixture or the
///   pipeline invocation itself is malformed; never a content assertion,
/// * collaborator failures (`Processor`, `Io`) — the component under test
///   or the filesystem failed; fatal to the run.
///
/// Nothing is retried. The first error fails the whole test, and produced
/// artifacts are preserved on any failure for post-mortem inspection.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Two regular files differ in content.
    #[error("content mismatch at {}: {detail}", path.display())]
    ContentMismatch { path: PathBuf, detail: String },

    /// One side has an entry the other side lacks.
    #[error("{} exists but {} doesn't exist", present.display(), absent.display())]
    StructuralMismatch { present: PathBuf, absent: PathBuf },

    /// A regular file was compared against a directory.
    #[error("the results have to be both directories or both files: {} {}", left.display(), right.display())]
    KindMismatch { left: PathBuf, right: PathBuf },

    /// A malformed fixture or pipeline invocation.
    #[error("usage error: {0}")]
    Usage(String),

    /// The component under test failed.
    #[error("processor failed: {0}")]
    Processor(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A filesystem read or listing failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HarnessError {
    /// Wrap an arbitrary component-under-test failure.
    pub fn processor<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HarnessError::Processor(Box::new(err))
    }

    /// True for content and structural mismatches — the result differed.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            HarnessError::ContentMismatch { .. } | HarnessError::StructuralMismatch { .. }
        )
    }

    /// True for broken fixtures and malformed invocations.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            HarnessError::KindMismatch { .. } | HarnessError::Usage(_)
        )
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
