//! Pipeline composition and test execution.
//!
//! An [`IntegrationTest`] wires one to three [`Processor`] invocations and a
//! final tree comparison into a single test run. The processors are fixed
//! when the test is built; each call to [`execute`](IntegrationTest::execute)
//! then runs one test case against fresh inputs, so a single harness serves
//! any number of source/result pairs.
//!
//! Produced results are temporary: after a successful run the harness
//! deletes them, while on any failure they are kept on disk so the
//! divergence can be inspected.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::compare::{FileComparator, TreeComparator};
use crate::error::{HarnessError, HarnessResult};

/// Converts data in preparation for an integration test.
///
/// The implementation runs the component under test on the source data and
/// returns the location of the produced result — a file or a directory, the
/// implementation chooses where. The produced location is owned by the
/// harness from then on and is deleted once the test has succeeded.
///
/// Any closure `Fn(&Path) -> HarnessResult<PathBuf>` is a processor.
pub trait Processor {
    /// Process `source` with the component under test and return where the
    /// result was stored.
    fn process(&self, source: &Path) -> HarnessResult<PathBuf>;
}

impl<F> Processor for F
where
    F: Fn(&Path) -> HarnessResult<PathBuf>,
{
    fn process(&self, source: &Path) -> HarnessResult<PathBuf> {
        self(source)
    }
}

/// The transformation topology of a test.
///
/// A shape fixes how many processors run and which two locations end up in
/// the final comparison. Building the shape up front makes the illegal
/// combinations unrepresentable: there is no way to configure a converter
/// without the processor that consumes its output.
pub enum Pipeline {
    /// One processor; its output is compared against a caller-supplied
    /// expected result.
    Single { processor: Box<dyn Processor> },

    /// Two independent processors; one output is the oracle for the other.
    /// `delete_results` controls whether both outputs are removed after a
    /// successful run or preserved regardless.
    Dual {
        first: Box<dyn Processor>,
        second: Box<dyn Processor>,
        delete_results: bool,
    },

    /// Process the source directly and, in parallel, convert it first and
    /// process the converted form; the two final outputs have to agree.
    ConvertThenProcess {
        processor: Box<dyn Processor>,
        converter: Box<dyn Processor>,
        reprocessor: Box<dyn Processor>,
    },
}

impl Pipeline {
    fn name(&self) -> &'static str {
        match self {
            Pipeline::Single { .. } => "single",
            Pipeline::Dual { .. } => "dual",
            Pipeline::ConvertThenProcess { .. } => "convert-then-process",
        }
    }
}

/// The per-invocation inputs of a test case, one variant per shape.
pub enum TestCase<'a> {
    /// For [`Pipeline::Single`]: process `source`, compare against
    /// `expected`. The expected result is owned by the caller and never
    /// touched.
    AgainstExpected {
        source: &'a Path,
        expected: &'a Path,
    },

    /// For [`Pipeline::Dual`]: process `source` with the first processor
    /// and `source2` with the second, then compare the outputs.
    AgainstEachOther {
        source: &'a Path,
        source2: &'a Path,
    },

    /// For [`Pipeline::ConvertThenProcess`]: both arms start from the one
    /// `source`.
    RoundTrip { source: &'a Path },
}

impl TestCase<'_> {
    fn name(&self) -> &'static str {
        match self {
            TestCase::AgainstExpected { .. } => "against-expected",
            TestCase::AgainstEachOther { .. } => "against-each-other",
            TestCase::RoundTrip { .. } => "round-trip",
        }
    }
}

/// Tests a component which processes data and stores it in the filesystem.
///
/// A test processes the source data in a first step and compares the
/// produced result with its counterpart in a second step. Both steps are
/// customized through the [`Processor`] and [`FileComparator`]
/// implementations given at construction. Sources and results each can be a
/// regular file or a directory, depending on the component under test.
///
/// A test is successful when every processing step and the final comparison
/// succeed; only then are the produced results deleted.
pub struct IntegrationTest {
    pipeline: Pipeline,
    comparator: Box<dyn FileComparator>,
}

impl IntegrationTest {
    pub fn new(pipeline: Pipeline, comparator: Box<dyn FileComparator>) -> Self {
        Self {
            pipeline,
            comparator,
        }
    }

    /// Shorthand for a [`Pipeline::Single`] test.
    pub fn single(processor: Box<dyn Processor>, comparator: Box<dyn FileComparator>) -> Self {
        Self::new(Pipeline::Single { processor }, comparator)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn comparator(&self) -> &dyn FileComparator {
        self.comparator.as_ref()
    }

    /// Execute one test case.
    ///
    /// The case has to match the configured pipeline shape; a mismatch is a
    /// [`Usage`](HarnessError::Usage) error. Processor failures abort the
    /// run before any comparison or deletion. On a mismatch every produced
    /// artifact stays on disk; on success the shape's transient artifacts
    /// are removed.
    pub fn execute(&self, case: TestCase<'_>) -> HarnessResult<()> {
        let trees = TreeComparator::new(self.comparator.as_ref());

        match (&self.pipeline, case) {
            (Pipeline::Single { processor }, TestCase::AgainstExpected { source, expected }) => {
                let produced = processor.process(source)?;
                trees.assert_equal(expected, &produced)?;
                remove_produced(&produced);
                Ok(())
            }
            (
                Pipeline::Dual {
                    first,
                    second,
                    delete_results,
                },
                TestCase::AgainstEachOther { source, source2 },
            ) => {
                let produced = first.process(source)?;
                let produced2 = second.process(source2)?;
                trees.assert_equal(&produced, &produced2)?;
                if *delete_results {
                    remove_produced(&produced);
                    remove_produced(&produced2);
                }
                Ok(())
            }
            (
                Pipeline::ConvertThenProcess {
                    processor,
                    converter,
                    reprocessor,
                },
                TestCase::RoundTrip { source },
            ) => {
                let processed = processor.process(source)?;
                let converted = converter.process(source)?;
                let reprocessed = reprocessor.process(&converted)?;

                trees.assert_equal(&reprocessed, &processed)?;

                remove_produced(&processed);
                remove_produced(&converted);
                remove_produced(&reprocessed);
                Ok(())
            }
            (pipeline, case) => Err(HarnessError::Usage(format!(
                "test case {:?} doesn't match pipeline shape {:?}",
                case.name(),
                pipeline.name()
            ))),
        }
    }
}

/// Remove a produced artifact, recursively if it is a directory.
///
/// The test has already passed when this runs, so a failing removal is
/// reported and the partially-deleted artifact left behind.
fn remove_produced(path: &Path) {
    debug!("removing produced artifact {}", path.display());

    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    if let Err(e) = removed {
        warn!("failed to remove produced artifact {}: {}", path.display(), e);
    }
}
