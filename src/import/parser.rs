//! Parser for the six-column task import format.
//!
//! The format is a header line `Sprint,Module,Task,Role,Priority,Notes`
//! followed by one task per line. Fields are separated by commas; a field
//! starting with `"` is quoted, may contain commas, and uses `""` for a
//! literal quote. Parsing never fails: problems are collected as warnings
//! and well-formed lines are still returned.

use thiserror::Error;

/// Header every import is expected to start with.
pub const EXPECTED_HEADER: &str = "Sprint,Module,Task,Role,Priority,Notes";

/// Number of columns a data line must provide.
pub const COLUMN_COUNT: usize = 6;

/// One task line, all values trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    /// Sprint name; empty means backlog.
    pub sprint: String,
    /// Module or area label.
    pub module: String,
    /// Task title.
    pub task: String,
    /// Responsible role.
    pub role: String,
    /// Priority label.
    pub priority: String,
    /// Free-form notes.
    pub notes: String,
}

/// A non-fatal problem found while parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseWarning {
    /// The input contained no non-blank lines.
    #[error("Empty input.")]
    EmptyInput,
    /// The first line is not the expected header.
    #[error("Expected header: {}. Got: {found}", EXPECTED_HEADER)]
    UnexpectedHeader {
        /// The trimmed header line found.
        found: String,
    },
    /// A data line had too few fields and was skipped.
    #[error("Line {line}: expected {} columns, got {found}.", COLUMN_COUNT)]
    TooFewColumns {
        /// 1-based position among non-blank lines.
        line: usize,
        /// Number of fields found.
        found: usize,
    },
}

/// Output of [`parse_import_csv`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Accepted rows in input order.
    pub rows: Vec<ImportRow>,
    /// Distinct non-empty sprint names in order of first appearance.
    pub sprint_names: Vec<String>,
    /// Warnings in input order.
    pub errors: Vec<ParseWarning>,
}

impl ParseResult {
    /// Returns the warnings as display strings.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Parses import text into rows, distinct sprint names and warnings.
///
/// # Examples
///
/// ```
/// use sprintboard::import::parse_import_csv;
///
/// let parsed = parse_import_csv(
///     "Sprint,Module,Task,Role,Priority,Notes\nS1,Auth,\"Login, SSO\",Dev,High,",
/// );
/// assert_eq!(parsed.rows.len(), 1);
/// assert_eq!(parsed.sprint_names, vec!["S1".to_owned()]);
/// assert!(parsed.errors.is_empty());
/// ```
#[must_use]
pub fn parse_import_csv(text: &str) -> ParseResult {
    let mut lines = text
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate();
    let Some((_, header_line)) = lines.next() else {
        return ParseResult {
            errors: vec![ParseWarning::EmptyInput],
            ..ParseResult::default()
        };
    };

    let mut result = ParseResult::default();
    let header = header_line.trim();
    if !header.eq_ignore_ascii_case(EXPECTED_HEADER) {
        result.errors.push(ParseWarning::UnexpectedHeader {
            found: header.to_owned(),
        });
    }

    for (index, line) in lines {
        let fields = split_line(line);
        let Some(row) = row_from_fields(&fields) else {
            result.errors.push(ParseWarning::TooFewColumns {
                line: index + 1,
                found: fields.len(),
            });
            continue;
        };
        if !row.sprint.is_empty() && !result.sprint_names.contains(&row.sprint) {
            result.sprint_names.push(row.sprint.clone());
        }
        result.rows.push(row);
    }
    result
}

fn row_from_fields(fields: &[String]) -> Option<ImportRow> {
    let [sprint, module, task, role, priority, notes, ..] = fields else {
        return None;
    };
    Some(ImportRow {
        sprint: sprint.trim().to_owned(),
        module: module.trim().to_owned(),
        task: task.trim().to_owned(),
        role: role.trim().to_owned(),
        priority: priority.trim().to_owned(),
        notes: notes.trim().to_owned(),
    })
}

/// Splits one line into raw fields.
///
/// A quoted field ends at its closing quote; any text after it up to the
/// next comma starts a new field. An unterminated quote runs to the end of
/// the line.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(ch) = chars.next() {
                if ch != '"' {
                    field.push(ch);
                } else if chars.next_if_eq(&'"').is_some() {
                    field.push('"');
                } else {
                    break;
                }
            }
            fields.push(field);
            if chars.peek().is_none() {
                return fields;
            }
            chars.next_if_eq(&',');
            continue;
        }
        let mut more = false;
        for ch in chars.by_ref() {
            if ch == ',' {
                more = true;
                break;
            }
            field.push(ch);
        }
        fields.push(field);
        if !more {
            return fields;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::split_line;
    use rstest::rstest;

    #[rstest]
    #[case("a,b,c", &["a", "b", "c"])]
    #[case("a,,c", &["a", "", "c"])]
    #[case("a,b,", &["a", "b", ""])]
    #[case("\"a, b\",c", &["a, b", "c"])]
    #[case("\"a\"\"b\",c", &["a\"b", "c"])]
    #[case("\"open, to end", &["open, to end"])]
    #[case("\"x\"y,z", &["x", "y", "z"])]
    #[case("\"x\",", &["x", ""])]
    #[case("", &[""])]
    fn splits_fields(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(split_line(line), expected);
    }
}
