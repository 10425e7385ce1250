//! Entry filtering by name, extension type and search pattern.
//!
//! Three independent criterion kinds are supported:
//!
//! - **types**: case-sensitive substring match against the entry's final
//!   extension (including the leading `.`)
//! - **patterns**: regular expressions searched anywhere in the entry path
//! - **files**: explicit names, matched against the entry path exactly like
//!   patterns
//!
//! The `exclusive` flag switches patterns and files from "any must match" to
//! "all must match". The kinds themselves are OR-ed together, and a kind with
//! an empty list does not participate.

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::ArchiveError;
use crate::Result;
use crate::paths;

/// Criteria used to narrow an archive's entry list.
///
/// The default value selects every entry.
///
/// # Examples
///
/// ```
/// use arcsift_core::FilterCriteria;
///
/// let criteria = FilterCriteria::default()
///     .with_types(vec![".csv".to_string()])
///     .with_patterns(vec!["^reports/".to_string()]);
/// assert!(!criteria.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Explicit names, matched against the entry path like patterns.
    pub files: Vec<String>,

    /// Extension fragments such as `.txt` or `txt`.
    pub types: Vec<String>,

    /// Regular expressions searched in the entry path.
    pub patterns: Vec<String>,

    /// Require every file/pattern of a kind to match instead of any.
    pub exclusive: bool,
}

impl FilterCriteria {
    /// Creates criteria that select every entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the explicit file names.
    #[must_use]
    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    /// Sets the extension types.
    #[must_use]
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    /// Sets the search patterns.
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Sets the exclusive combination mode.
    #[must_use]
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    /// Returns `true` if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.types.is_empty() && self.patterns.is_empty()
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files={:?} types={:?} patterns={:?} exclusive={}",
            self.files, self.types, self.patterns, self.exclusive
        )
    }
}

/// A compiled set of expressions for one criterion kind.
struct Matcher {
    expressions: Vec<Regex>,
    exclusive: bool,
}

impl Matcher {
    fn compile(sources: &[String], exclusive: bool) -> Result<Self> {
        let expressions = sources
            .iter()
            .map(|source| {
                Regex::new(source).map_err(|e| ArchiveError::InvalidPattern {
                    pattern: source.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            expressions,
            exclusive,
        })
    }

    fn is_active(&self) -> bool {
        !self.expressions.is_empty()
    }

    fn matches(&self, entry: &str) -> bool {
        if self.exclusive {
            // `all` stops at the first expression that fails.
            self.expressions.iter().all(|re| re.is_match(entry))
        } else {
            self.expressions.iter().any(|re| re.is_match(entry))
        }
    }
}

/// Compiled form of [`FilterCriteria`], reusable across entry lists.
pub struct EntryFilter {
    types: Vec<String>,
    patterns: Matcher,
    files: Matcher,
}

impl EntryFilter {
    /// Compiles the criteria.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidPattern`] if a pattern or file name is
    /// not a valid regular expression.
    pub fn new(criteria: &FilterCriteria) -> Result<Self> {
        let patterns = Matcher::compile(&criteria.patterns, criteria.exclusive)?;
        let files = Matcher::compile(&criteria.files, criteria.exclusive)?;
        let types = criteria
            .types
            .iter()
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();

        Ok(Self {
            types,
            patterns,
            files,
        })
    }

    /// Returns `true` if no criterion participates.
    pub fn is_identity(&self) -> bool {
        self.types.is_empty() && !self.patterns.is_active() && !self.files.is_active()
    }

    /// Decides whether a single entry is selected.
    pub fn selects(&self, entry: &str) -> bool {
        if self.is_identity() {
            return true;
        }

        let extension = paths::extension(Path::new(entry));
        let by_type = !extension.is_empty()
            && self.types.iter().any(|t| extension.contains(t.as_str()));

        by_type
            || (self.patterns.is_active() && self.patterns.matches(entry))
            || (self.files.is_active() && self.files.matches(entry))
    }

    /// Applies the filter, preserving entry order.
    pub fn apply<S: AsRef<str>>(&self, entries: &[S]) -> Vec<String> {
        entries
            .iter()
            .map(AsRef::as_ref)
            .filter(|entry| self.selects(entry))
            .map(str::to_string)
            .collect()
    }
}

/// Filters `entries` against `criteria`.
///
/// The result keeps the original relative order and never contains an entry
/// more often than the input did. Empty criteria return the input unchanged.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidPattern`] for an invalid regular expression
/// in either the patterns or the file names.
///
/// # Examples
///
/// ```
/// use arcsift_core::FilterCriteria;
/// use arcsift_core::filter::filter_entries;
///
/// let entries = ["a.txt", "b.log", "ab.txt"];
/// let criteria = FilterCriteria::default()
///     .with_patterns(vec!["a".into(), "b".into()])
///     .with_exclusive(true);
///
/// assert_eq!(filter_entries(&entries, &criteria).unwrap(), vec!["ab.txt"]);
/// ```
pub fn filter_entries<S: AsRef<str>>(entries: &[S], criteria: &FilterCriteria) -> Result<Vec<String>> {
    let filter = EntryFilter::new(criteria)?;
    let selected = filter.apply(entries);
    tracing::debug!(
        total = entries.len(),
        selected = selected.len(),
        %criteria,
        "filtered archive entries"
    );
    Ok(selected)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let entries = strings(&["z.txt", "a/", "a/b.bin", "z.txt"]);
        let result = filter_entries(&entries, &FilterCriteria::default()).unwrap();
        assert_eq!(result, entries);
    }

    #[test]
    fn test_inclusive_patterns() {
        let entries = ["a.txt", "b.log", "ab.txt"];
        let criteria = FilterCriteria::default().with_patterns(strings(&["a", "b"]));
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["a.txt", "b.log", "ab.txt"]));
    }

    #[test]
    fn test_exclusive_patterns() {
        let entries = ["a.txt", "b.log", "ab.txt"];
        let criteria = FilterCriteria::default()
            .with_patterns(strings(&["a", "b"]))
            .with_exclusive(true);
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["ab.txt"]));
    }

    #[test]
    fn test_type_filter_is_case_sensitive() {
        let entries = ["x.TXT", "y.csv"];
        let criteria = FilterCriteria::default().with_types(strings(&[".txt"]));
        let result = filter_entries(&entries, &criteria).unwrap();
        assert!(result.is_empty());

        let criteria = FilterCriteria::default().with_types(strings(&[".TXT"]));
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["x.TXT"]));
    }

    #[test]
    fn test_type_filter_substring_without_dot() {
        let entries = ["doc/readme.md", "doc/data.json", "Makefile"];
        let criteria = FilterCriteria::default().with_types(strings(&["json"]));
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["doc/data.json"]));
    }

    #[test]
    fn test_empty_type_string_is_ignored() {
        let entries = ["a.txt", "Makefile"];
        let criteria = FilterCriteria::default().with_types(strings(&[""]));
        // The only criterion is inert, so every entry passes.
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["a.txt", "Makefile"]));
    }

    #[test]
    fn test_files_match_like_patterns() {
        let entries = ["data_2024.csv", "notes.txt", "other/data.csv"];
        let by_name = FilterCriteria::default().with_files(strings(&["data.*csv"]));
        let by_pattern = FilterCriteria::default().with_patterns(strings(&["data.*csv"]));

        let named = filter_entries(&entries, &by_name).unwrap();
        assert_eq!(named, strings(&["data_2024.csv", "other/data.csv"]));
        assert_eq!(named, filter_entries(&entries, &by_pattern).unwrap());
    }

    #[test]
    fn test_invalid_file_name_expression() {
        let criteria = FilterCriteria::default().with_files(strings(&["report[1"]));
        let result = filter_entries(&["report[1].pdf"], &criteria);
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidPattern { ref pattern, .. }) if pattern == "report[1"
        ));
    }

    #[test]
    fn test_exclusive_files() {
        let entries = ["logs/app.log", "logs/db.log", "app/config.toml"];
        let criteria = FilterCriteria::default()
            .with_files(strings(&["logs", "app"]))
            .with_exclusive(true);
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["logs/app.log"]));
    }

    #[test]
    fn test_kinds_combine_with_or() {
        let entries = ["a.txt", "b.csv", "c.bin", "d.log"];
        let criteria = FilterCriteria::default()
            .with_types(strings(&[".csv"]))
            .with_patterns(strings(&["^d"]))
            .with_files(strings(&["a.txt"]));
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["a.txt", "b.csv", "d.log"]));
    }

    #[test]
    fn test_exclusive_does_not_span_kinds() {
        // Type matches on its own even though the exclusive patterns do not.
        let entries = ["notes.md", "readme.md"];
        let criteria = FilterCriteria::default()
            .with_types(strings(&[".md"]))
            .with_patterns(strings(&["read", "zzz"]))
            .with_exclusive(true);
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["notes.md", "readme.md"]));
    }

    #[test]
    fn test_regex_pattern() {
        let entries = ["img/001.png", "img/cover.png", "img/002.jpg"];
        let criteria = FilterCriteria::default().with_patterns(strings(&[r"\d{3}\.png$"]));
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result, strings(&["img/001.png"]));
    }

    #[test]
    fn test_invalid_pattern() {
        let criteria = FilterCriteria::default().with_patterns(strings(&["(unclosed"]));
        let result = filter_entries(&["a"], &criteria);
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidPattern { ref pattern, .. }) if pattern == "(unclosed"
        ));
    }

    #[test]
    fn test_duplicates_in_input_are_kept_not_added() {
        let entries = ["a.txt", "a.txt"];
        let criteria = FilterCriteria::default()
            .with_types(strings(&[".txt"]))
            .with_files(strings(&["a"]));
        let result = filter_entries(&entries, &criteria).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_display() {
        let criteria = FilterCriteria::default()
            .with_types(strings(&[".zip"]))
            .with_exclusive(true);
        let display = criteria.to_string();
        assert!(display.contains("types=[\".zip\"]"));
        assert!(display.contains("exclusive=true"));
    }
}
