use std::fs;
use std::path::Path;

use regex::Regex;

use crate::compare::FileComparator;
use crate::error::{HarnessError, HarnessResult};

/// Line-based text file comparison.
///
/// Two files are equal when their relevant lines are equal in order. Which
/// lines are relevant, and how they are normalized, is configured at
/// construction:
///
/// * lines matching any ignore pattern are skipped entirely before the
///   comparison — useful for timestamps, hostnames and other noise,
/// * with [`trim_lines`](Self::trim_lines), each retained line has leading
///   and trailing whitespace stripped before the equality check.
///
/// Mismatch diagnostics cite the 1-based physical line numbers on both
/// sides, counting skipped lines.
///
/// ```
/// use attest::TextFileComparator;
/// use regex::Regex;
///
/// let comparator = TextFileComparator::new()
///     .ignore_lines_matching(Regex::new(r"^generated: ").unwrap())
///     .trim_lines();
/// # let _ = comparator;
/// ```
#[derive(Debug, Default)]
pub struct TextFileComparator {
    ignore_patterns: Vec<Regex>,
    trim_lines: bool,
}

impl TextFileComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip every line the pattern matches.
    ///
    /// Matching is the regex crate's usual substring search; anchor with
    /// `^...$` for whole-line semantics.
    pub fn ignore_lines_matching(mut self, pattern: Regex) -> Self {
        self.ignore_patterns.push(pattern);
        self
    }

    /// Strip leading and trailing whitespace from each retained line before
    /// comparing.
    pub fn trim_lines(mut self) -> Self {
        self.trim_lines = true;
        self
    }

    fn is_relevant(&self, line: &str) -> bool {
        !self.ignore_patterns.iter().any(|p| p.is_match(line))
    }

    /// Relevant lines of `text`, paired with their 1-based physical line
    /// numbers.
    fn relevant_lines<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, &'t str)> {
        text.lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| self.is_relevant(line))
    }
}

impl FileComparator for TextFileComparator {
    fn assert_equal(&self, expected: &Path, actual: &Path) -> HarnessResult<()> {
        let expected_text = fs::read_to_string(expected)?;
        let actual_text = fs::read_to_string(actual)?;

        let mut expected_lines = self.relevant_lines(&expected_text);
        let mut actual_lines = self.relevant_lines(&actual_text);

        loop {
            match (expected_lines.next(), actual_lines.next()) {
                (None, None) => return Ok(()),
                (Some((expected_no, mut expected_line)), Some((actual_no, mut actual_line))) => {
                    if self.trim_lines {
                        expected_line = expected_line.trim();
                        actual_line = actual_line.trim();
                    }
                    if expected_line != actual_line {
                        return Err(HarnessError::ContentMismatch {
                            path: actual.to_path_buf(),
                            detail: format!(
                                "file {}:{} differs from {}:{}: expected {:?}, got {:?}",
                                expected.display(),
                                expected_no,
                                actual.display(),
                                actual_no,
                                expected_line,
                                actual_line
                            ),
                        });
                    }
                }
                (Some((expected_no, expected_line)), None) => {
                    return Err(HarnessError::ContentMismatch {
                        path: actual.to_path_buf(),
                        detail: format!(
                            "file {} ends before {}:{}: expected {:?}, got end of file",
                            actual.display(),
                            expected.display(),
                            expected_no,
                            expected_line
                        ),
                    });
                }
                (None, Some((actual_no, actual_line))) => {
                    return Err(HarnessError::ContentMismatch {
                        path: actual.to_path_buf(),
                        detail: format!(
                            "file {} ends before {}:{}: expected end of file, got {:?}",
                            expected.display(),
                            actual.display(),
                            actual_no,
                            actual_line
                        ),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignored_lines_are_not_relevant() {
        let comparator = TextFileComparator::new()
            .ignore_lines_matching(Regex::new(r"^# ").unwrap());

        let text = "# header\nbody\n# footer\n";
        let lines: Vec<_> = comparator.relevant_lines(text).collect();
        assert_eq!(lines, vec![(2, "body")]);
    }

    #[test]
    fn line_numbers_count_skipped_lines() {
        let comparator = TextFileComparator::new()
            .ignore_lines_matching(Regex::new(r"^--").unwrap());

        let text = "--\n--\nthird\n--\nfifth\n";
        let lines: Vec<_> = comparator.relevant_lines(text).collect();
        assert_eq!(lines, vec![(3, "third"), (5, "fifth")]);
    }

    #[test]
    fn every_pattern_applies() {
        let comparator = TextFileComparator::new()
            .ignore_lines_matching(Regex::new(r"^a").unwrap())
            .ignore_lines_matching(Regex::new(r"^b").unwrap());

        assert!(!comparator.is_relevant("a line"));
        assert!(!comparator.is_relevant("b line"));
        assert!(comparator.is_relevant("c line"));
    }
}
