//! Result comparison.
//!
//! `TreeComparator` decides equivalence of two filesystem entries,
//! recursively for directories. Regular files are delegated to a pluggable
//! [`FileComparator`] strategy; directories are reduced to a set of child
//! comparisons. The submodules provide the reference strategies: byte-exact,
//! line-based text and extracted-text comparison.

mod bytes;
mod extract;
mod text;

pub use bytes::ByteFileComparator;
pub use extract::ExtractedTextComparator;
pub use text::TextFileComparator;

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::{HarnessError, HarnessResult};

/// Tests two regular files for equality.
///
/// What counts as equal depends on the test case and the file type: two
/// text files might be equal after trimming whitespace, two reports equal
/// once a timestamp line is ignored. Directory equality is handled by
/// [`TreeComparator`] directly, so implementations only ever see regular
/// files.
///
/// An implementation reports inequality as a
/// [`ContentMismatch`](HarnessError::ContentMismatch) carrying enough
/// context to locate the divergence. It may also fail with
/// [`Io`](HarnessError::Io) when a file can't be read, which is a
/// collaborator failure, not a verdict about the content.
pub trait FileComparator {
    /// Assert that `expected` and `actual` are equal.
    ///
    /// Invoked once per regular file in the result set. The `actual` file is
    /// the produced one and will be deleted by the runner if the whole test
    /// succeeds; `expected` is never touched.
    fn assert_equal(&self, expected: &Path, actual: &Path) -> HarnessResult<()>;
}

/// What a path resolves to, as far as comparison is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
    Absent,
}

fn kind_of(path: &Path) -> HarnessResult<EntryKind> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(EntryKind::Directory),
        Ok(meta) if meta.is_file() => Ok(EntryKind::File),
        Ok(_) => Err(HarnessError::Usage(format!(
            "{} is neither a regular file nor a directory",
            path.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EntryKind::Absent),
        Err(e) => Err(e.into()),
    }
}

/// Immediate child names, sorted for deterministic traversal.
fn child_names(dir: &Path) -> HarnessResult<BTreeSet<OsString>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        names.insert(entry?.file_name());
    }
    Ok(names)
}

/// Recursive equivalence check over filesystem trees.
///
/// Borrows the leaf strategy; the comparator itself is stateless and can be
/// reused across any number of comparisons.
pub struct TreeComparator<'a> {
    files: &'a dyn FileComparator,
}

impl<'a> TreeComparator<'a> {
    pub fn new(files: &'a dyn FileComparator) -> Self {
        Self { files }
    }

    /// Assert that the trees rooted at `expected` and `actual` are
    /// equivalent.
    ///
    /// Both arguments may be regular files or directories, but their kinds
    /// have to match: comparing a file to a directory is a
    /// [`KindMismatch`](HarnessError::KindMismatch) usage error, not a
    /// content mismatch. If exactly one side is absent the result is a
    /// [`StructuralMismatch`](HarnessError::StructuralMismatch) naming the
    /// side that exists. The first mismatch fails the whole comparison.
    pub fn assert_equal(&self, expected: &Path, actual: &Path) -> HarnessResult<()> {
        debug!("comparing {} against {}", expected.display(), actual.display());

        match (kind_of(expected)?, kind_of(actual)?) {
            (EntryKind::Directory, EntryKind::Directory) => {
                self.assert_equal_directories(expected, actual)
            }
            (EntryKind::File, EntryKind::File) => self.files.assert_equal(expected, actual),
            (EntryKind::Absent, EntryKind::Absent) => Err(HarnessError::Usage(format!(
                "neither {} nor {} exists",
                expected.display(),
                actual.display()
            ))),
            (EntryKind::Absent, _) => Err(HarnessError::StructuralMismatch {
                present: actual.to_path_buf(),
                absent: expected.to_path_buf(),
            }),
            (_, EntryKind::Absent) => Err(HarnessError::StructuralMismatch {
                present: expected.to_path_buf(),
                absent: actual.to_path_buf(),
            }),
            _ => Err(HarnessError::KindMismatch {
                left: expected.to_path_buf(),
                right: actual.to_path_buf(),
            }),
        }
    }

    /// Compare two directories child by child.
    ///
    /// Two passes are required: one side alone cannot enumerate the union of
    /// names, so names present only under `expected` would be silently
    /// skipped by the first pass. A name missing on the opposite side still
    /// recurses and yields a structural mismatch rather than a crash.
    fn assert_equal_directories(&self, expected: &Path, actual: &Path) -> HarnessResult<()> {
        let actual_names = child_names(actual)?;

        for name in &actual_names {
            self.assert_equal(&expected.join(name), &actual.join(name))?;
        }

        for name in child_names(expected)?.difference(&actual_names) {
            self.assert_equal(&expected.join(name), &actual.join(name))?;
        }

        Ok(())
    }
}
