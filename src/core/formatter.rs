//! Name formatting: trim, join, title-case, truncate.

use crate::domain::model::{FormattedName, NamePart, MAX_NAME_LENGTH};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use std::io::Write;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameFormatter {
    max_length: usize,
}

impl NameFormatter {
    pub fn new() -> Self {
        Self {
            max_length: MAX_NAME_LENGTH,
        }
    }

    /// A formatter with a tighter limit. `max_length` must be in
    /// `1..=MAX_NAME_LENGTH`.
    pub fn with_max_length(max_length: usize) -> Result<Self> {
        validate_range("format.max_length", max_length, 1, MAX_NAME_LENGTH)?;
        Ok(Self { max_length })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Coerces, trims, joins and title-cases both parts without truncating.
    pub fn normalize(&self, first: impl Into<NamePart>, last: impl Into<NamePart>) -> String {
        let first: NamePart = first.into();
        let last: NamePart = last.into();
        let joined = format!("{} {}", first.to_text().trim(), last.to_text().trim());
        title_case(joined.trim())
    }

    pub fn format(&self, first: impl Into<NamePart>, last: impl Into<NamePart>) -> FormattedName {
        let normalized = self.normalize(first, last);
        let truncated = truncate_chars(&normalized, self.max_length);
        if truncated.len() < normalized.len() {
            tracing::trace!(
                full = %normalized,
                max_length = self.max_length,
                "Truncated formatted name"
            );
        }
        FormattedName::new_unchecked(truncated.to_string())
    }
}

impl Default for NameFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a first and last name part into a title-cased name of at most
/// 15 characters.
///
/// ```
/// use better_name::format_name;
///
/// assert_eq!(format_name("  john ", "doe"), "John Doe");
/// assert_eq!(format_name(123, "doe"), "123 Doe");
/// assert_eq!(format_name("christopher", "schwarzenegger"), "Christopher Sch");
/// ```
pub fn format_name(first: impl Into<NamePart>, last: impl Into<NamePart>) -> FormattedName {
    NameFormatter::default().format(first, last)
}

/// Writes the normalized name and a newline to `writer`. Unlike
/// [`format_name`] the output is not truncated.
pub fn write_name<W: Write>(
    writer: &mut W,
    first: impl Into<NamePart>,
    last: impl Into<NamePart>,
) -> std::io::Result<()> {
    writeln!(writer, "{}", NameFormatter::default().normalize(first, last))
}

#[deprecated(note = "use `format_name` and print the returned value")]
pub fn print_name(first: impl Into<NamePart>, last: impl Into<NamePart>) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = write_name(&mut handle, first, last) {
        tracing::warn!("Failed to write name to stdout: {}", e);
    }
}

/// Uppercases every cased character that follows an uncased one and
/// lowercases the rest. Digits, whitespace and punctuation are uncased, so
/// `"anne-marie o'neill"` becomes `"Anne-Marie O'Neill"`. Combining marks
/// belong to the letter before them and never start a new segment.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for ch in text.chars() {
        if is_combining_mark(ch) {
            out.push(ch);
        } else if !is_cased(ch) {
            out.push(ch);
            previous_cased = false;
        } else if previous_cased {
            for mapped in ch.to_lowercase() {
                push_mapped(&mut out, mapped, &mut previous_cased);
            }
        } else {
            // ß -> "SS" -> "Ss"，ŉ -> "ʼN"
            for mapped in ch.to_uppercase() {
                push_mapped(&mut out, mapped, &mut previous_cased);
            }
        }
    }

    out
}

// 展開後的字元再套用一次同樣規則，確保結果可重複套用
fn push_mapped(out: &mut String, ch: char, previous_cased: &mut bool) {
    if is_combining_mark(ch) {
        out.push(ch);
    } else if !is_cased(ch) {
        out.push(ch);
        *previous_cased = false;
    } else {
        if *previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
        *previous_cased = true;
    }
}

fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase()
}

fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch.general_category(),
        GeneralCategory::NonspacingMark | GeneralCategory::EnclosingMark
    )
}

/// Returns the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
