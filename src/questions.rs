//! Loading question lists from CSV input.
//!
//! Only the first column of each row is read. Rows are line based: a quoted
//! region keeps commas from splitting the column, but no CSV unescaping is
//! applied beyond removing one outer pair of double quotes.

use std::fs;
use std::path::Path;

use crate::error::BatchError;

/// Reads the questions from the CSV file at `path`, in file order.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<String>, BatchError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let questions = parse_questions(&contents);
    log::debug!("loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Extracts one question per non-blank row of `contents`.
pub fn parse_questions(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(first_column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| strip_outer_quotes(value).to_string())
        .collect()
}

/// Removes a single pair of surrounding double quotes, if both ends carry one.
pub fn strip_outer_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// A quote opens a quoted region only as the first character of the row;
/// elsewhere it is literal. `""` inside a quoted region stays quoted.
fn first_column(line: &str) -> &str {
    let mut quoted = line.starts_with('"');
    let mut chars = line.char_indices().skip(usize::from(quoted)).peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' if quoted => {
                if matches!(chars.peek(), Some((_, '"'))) {
                    chars.next();
                } else {
                    quoted = false;
                }
            }
            ',' if !quoted => return &line[..idx],
            _ => {}
        }
    }
    line
}
