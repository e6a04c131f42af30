//! Slide text cleanup.
//!
//! Lines come out of the markup still in escaped form (non-ASCII characters
//! as `\uNNNN ?` or `\'xx`), so every comparison against metadata is done
//! against the metadata escaped both ways.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::types::{Content, FormattedLine};

/// Matches verse labels such as "Verse 2" or "vers 3".
static VERSE_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^verse?\s*\d+").unwrap());

/// Matches a bare verse number on its own line, e.g. "3" or "12.".
static VERSE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}\.?$").unwrap());

/// Control words that leak into extracted text.
const CONTROL_TOKENS: &[&str] = &[r"\tab", r"\par"];

/// Mis-encoded line separator seen in some generators' output.
const STRAY_LINE_SEPARATOR: &str = r"\u8232?";

/// Lines starting with this are word explanations.
const ANNOTATION_MARKER: char = '*';

const COPYRIGHT: &str = "©";

pub const ELLIPSIS: &str = "...";

/// Escape non-ASCII characters as `\uNNNN ?`.
pub fn escape_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        let v = c as u32;
        if (32..=127).contains(&v) {
            out.push(c);
        } else {
            out.push_str(&format!("\\u{} ?", v));
        }
    }
    out
}

/// Escape non-ASCII characters as `\'xx`.
pub fn escape_hex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        let v = c as u32;
        if (32..=127).contains(&v) {
            out.push(c);
        } else {
            out.push_str(&format!("\\'{:x}", v));
        }
    }
    out
}

/// Which kind of slide the lines belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanMode {
    /// Synthesized info slide: no blank lines at all.
    Intro,
    /// Regular lyric slide: blank lines only trimmed at the ends.
    Body,
}

/// Applies the content cleanup passes to extracted slide lines.
#[derive(Debug, Clone)]
pub struct LineCleaner {
    mode: CleanMode,
}

impl LineCleaner {
    pub fn new(mode: CleanMode) -> Self {
        Self { mode }
    }

    /// Clean `lines`. An empty result means the slide should be removed.
    ///
    /// The passes run in a fixed order; later passes rely on earlier trimming.
    pub fn clean(
        &self,
        lines: Vec<FormattedLine>,
        content: Option<&Content>,
    ) -> Vec<FormattedLine> {
        let copyright_prefixes = [escape_unicode(COPYRIGHT), escape_hex(COPYRIGHT)];

        let mut lines: Vec<FormattedLine> = lines
            .into_iter()
            .map(|line| {
                let mut text = line.text;
                for token in CONTROL_TOKENS {
                    text = text.replace(*token, "");
                }
                FormattedLine::new(line.formatting, text.trim())
            })
            .filter(|line| !line.text.starts_with(ANNOTATION_MARKER))
            .map(|mut line| {
                line.text = line
                    .text
                    .replace(ANNOTATION_MARKER, "")
                    .replace(STRAY_LINE_SEPARATOR, "");
                line
            })
            .filter(|line| {
                !copyright_prefixes
                    .iter()
                    .any(|prefix| line.text.starts_with(prefix.as_str()))
            })
            .filter(|line| !VERSE_LABEL_REGEX.is_match(&line.text))
            .map(|mut line| {
                line.text = line.text.trim().to_string();
                line
            })
            .collect();

        match self.mode {
            CleanMode::Intro => lines.retain(|line| !line.is_blank()),
            CleanMode::Body => trim_ends(&mut lines),
        }

        if self.mode == CleanMode::Body {
            if let Some(content) = content {
                if let Some(filter) = MetadataFilter::new(content) {
                    lines.retain(|line| !filter.matches(&line.text));
                }
            }
        }

        if lines.is_empty() {
            return lines;
        }

        merge_verse_number(&mut lines);
        center_ellipsis(&mut lines);

        lines
    }
}

fn is_filler(text: &str) -> bool {
    matches!(text, "" | "-" | ".")
}

fn trim_ends(lines: &mut Vec<FormattedLine>) {
    let start = lines
        .iter()
        .position(|line| !is_filler(&line.text))
        .unwrap_or(lines.len());
    lines.drain(..start);

    while lines.last().is_some_and(|line| is_filler(&line.text)) {
        lines.pop();
    }
}

/// Moves a lone verse number on the first line into a non-blank next line.
fn merge_verse_number(lines: &mut Vec<FormattedLine>) {
    if lines.len() > 1 && !lines[1].is_blank() && VERSE_NUMBER_REGEX.is_match(&lines[0].text) {
        let number = lines.remove(0);
        let next = &mut lines[0];
        next.text = format!("{}. {}", number.text.trim_end_matches('.'), next.text);
    }
}

/// Pads the end opposite a lone ellipsis so the text sits visually centered.
fn center_ellipsis(lines: &mut Vec<FormattedLine>) {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return;
    };

    match (first.text == ELLIPSIS, last.text == ELLIPSIS) {
        (true, false) => {
            let pad = last.with_text("");
            lines.push(pad);
        }
        (false, true) => {
            let pad = first.with_text("");
            lines.insert(0, pad);
        }
        (true, true) => {
            log::debug!("Ellipsis at both ends, leaving slide unpadded");
        }
        (false, false) => {}
    }
}

/// Detects lines that repeat the song's own reference or info lines.
struct MetadataFilter {
    prefixes: [String; 2],
    info: Vec<String>,
}

impl MetadataFilter {
    fn new(content: &Content) -> Option<Self> {
        let (book, number) = content.songbook_entry()?;

        let info = content
            .info()
            .iter()
            .flat_map(|line| [escape_unicode(line), escape_hex(line)])
            .map(|line| line.to_lowercase())
            .collect();

        Some(Self {
            prefixes: [
                format!("{} {:03}", book, number).to_lowercase(),
                format!("{} {}", book, number).to_lowercase(),
            ],
            info,
        })
    }

    fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        if self.prefixes.iter().any(|p| lower.starts_with(p.as_str())) {
            return true;
        }

        let swapped = lower.replace(", ", ". ");
        self.info.iter().any(|info| *info == lower || *info == swapped)
    }
}
