//! Songbook file naming convention.
//!
//! Songs are stored as `"<BOOK> <NNN> - <Title>.pro"`, with the number
//! zero-padded to three digits. Some libraries omit the space between book
//! and number (`"DDS007 - Title.pro"`), so matching tolerates both.

use pro_core::Content;
use regex::Regex;

/// File extension of presentation documents.
pub const PRESENTATION_EXTENSION: &str = "pro";

/// Whether `file_name` is the document for `book` number `number`.
pub fn matches_number(book: &str, number: u32, file_name: &str) -> bool {
    let pattern = format!(
        r"(?i)^{} ?{:03} .*\.{}$",
        regex::escape(book),
        number,
        PRESENTATION_EXTENSION
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(file_name))
}

/// The song number in `file_name`, if it belongs to `book`.
///
/// Accepts variant suffixes such as `"DDS 007a - Title.pro"`.
pub fn extract_number(book: &str, file_name: &str) -> Option<u32> {
    let pattern = format!(r"(?i)^{}\s*(\d+)(?:[a-z]| -)?", regex::escape(book));
    let re = Regex::new(&pattern).ok()?;
    re.captures(file_name)?.get(1)?.as_str().parse().ok()
}

/// The title part of a file stem, e.g. `"Title - Part"` from
/// `"DDS 007 - Title - Part"`.
pub fn title_from_stem(stem: &str) -> String {
    stem.split(" - ").skip(1).collect::<Vec<_>>().join(" - ")
}

/// File name the processed document is written under.
pub fn output_file_name(content: &Content) -> String {
    let name = content.presentation_name().replace('?', "");
    format!("{}.{}", name, PRESENTATION_EXTENSION)
}
