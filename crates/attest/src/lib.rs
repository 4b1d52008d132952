//! Attest — an integration-test harness for components that persist their
//! results to the filesystem.
//!
//! A test processes source data with the component under test and compares
//! the produced file or directory tree against a pre-recorded expectation,
//! or against the output of a second pipeline. Directory trees are compared
//! recursively; regular files are judged by a pluggable [`FileComparator`]
//! strategy. Produced results are deleted after a successful run and kept
//! for inspection after a failed one.
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use attest::{HarnessResult, IntegrationTest, TestCase, TextFileComparator};
//!
//! fn run_component(source: &Path) -> HarnessResult<PathBuf> {
//!     // invoke the component under test, return where it stored its output
//! #    Ok(source.to_path_buf())
//! }
//!
//! # fn main() -> HarnessResult<()> {
//! let test = IntegrationTest::single(
//!     Box::new(run_component),
//!     Box::new(TextFileComparator::new().trim_lines()),
//! );
//! test.execute(TestCase::AgainstExpected {
//!     source: Path::new("fixtures/report-source"),
//!     expected: Path::new("fixtures/report-expected"),
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod error;
pub mod pipeline;

pub use compare::{
    ByteFileComparator, ExtractedTextComparator, FileComparator, TextFileComparator,
    TreeComparator,
};
pub use error::{HarnessError, HarnessResult};
pub use pipeline::{IntegrationTest, Pipeline, Processor, TestCase};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
