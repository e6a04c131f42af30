//! Reading and writing the rich-text markup stored in slide text elements.
//!
//! Slides come from several generations of the presentation software, and each
//! one terminates a formatting run with a different control word before the
//! visible text. Rather than one grammar that tries to cover them all, each
//! variant gets its own pattern and the first one that matches anything wins.

use regex::Regex;
use std::sync::LazyLock;

use crate::font::DEFAULT_FONT_SIZE;
use crate::normalize::{escape_unicode, CleanMode};
use crate::types::FormattedLine;

/// Formatting run prefix written when a line carries none of its own.
pub const DEFAULT_RUN_FORMATTING: &str = r"\b0\i0\ul0\strike0";

/// Paragraph separator used when joining lines.
pub const PARAGRAPH_BREAK: &str = r"\par ";

/// Info slide line formatting: the songbook reference line.
pub const INTRO_REFERENCE_FORMATTING: &str = r"\sl288\slmult1";

/// Info slide line formatting: the title, with taller line spacing.
pub const INTRO_TITLE_FORMATTING: &str = r"\sl360\slmult1";

/// Info slide line formatting: detail lines, in italics.
pub const INTRO_DETAIL_FORMATTING: &str = r"\sl288\slmult1\i";

/// Markup generator variants, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupVariant {
    /// Runs end with a background color word, `\cbN`.
    BackgroundColor,
    /// Runs end with `\nosupersub`.
    NoSuperSub,
    /// Runs end with `\ltrch` and the text runs to the closing brace.
    LeftToRight,
}

static EXTRACTION_PATTERNS: LazyLock<Vec<(MarkupVariant, Regex)>> = LazyLock::new(|| {
    vec![
        (
            MarkupVariant::BackgroundColor,
            Regex::new(r"(\\b0?\\i0?\\ul0?\\strike0?).*?\\cb\d+ ?(.*?)(?:\\par|\})").unwrap(),
        ),
        (
            MarkupVariant::NoSuperSub,
            Regex::new(r"(\\b0?\\i0?\\ul0?\\strike0?).*?\\nosupersub ?(.*?)(?:\\par|\})")
                .unwrap(),
        ),
        (
            MarkupVariant::LeftToRight,
            Regex::new(r"(\\b0?\\i0?\\ul0?\\strike0?).*?\\ltrch ?(.*?)\}").unwrap(),
        ),
    ]
});

/// Pulls formatted lines out of a markup blob.
#[derive(Debug, Clone, Default)]
pub struct RichTextExtractor;

impl RichTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract lines using the first pattern that matches at all.
    ///
    /// Returns an empty list when no pattern matches.
    pub fn extract(&self, rtf: &str) -> Vec<FormattedLine> {
        self.extract_with_variant(rtf)
            .map(|(_, lines)| lines)
            .unwrap_or_default()
    }

    /// Like [`extract`](Self::extract), also reporting which variant matched.
    pub fn extract_with_variant(&self, rtf: &str) -> Option<(MarkupVariant, Vec<FormattedLine>)> {
        EXTRACTION_PATTERNS.iter().find_map(|(variant, regex)| {
            let lines: Vec<FormattedLine> = regex
                .captures_iter(rtf)
                .map(|caps| FormattedLine::new(&caps[1], caps[2].trim()))
                .collect();

            if lines.is_empty() {
                None
            } else {
                log::debug!("Extracted {} lines as {:?}", lines.len(), variant);
                Some((*variant, lines))
            }
        })
    }
}

/// Serializes cleaned lines back into a markup blob.
#[derive(Debug, Clone)]
pub struct RichTextComposer {
    mode: CleanMode,
    font_size: u32,
}

impl RichTextComposer {
    /// Composer for lyric slides at the given font size (markup scale).
    pub fn body(font_size: u32) -> Self {
        Self {
            mode: CleanMode::Body,
            font_size,
        }
    }

    /// Composer for info slides, which always use the base size.
    pub fn intro() -> Self {
        Self {
            mode: CleanMode::Intro,
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Build the markup for `lines`.
    pub fn compose(&self, lines: &[FormattedLine]) -> String {
        let paragraphs: Vec<String> = match self.mode {
            CleanMode::Intro => lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let formatting = if line.formatting.is_empty() {
                        positional_intro_formatting(i)
                    } else {
                        line.formatting.as_str()
                    };
                    format!("{} {}", formatting, escape_unicode(&line.text))
                })
                .collect(),
            CleanMode::Body => lines
                .iter()
                .map(|line| {
                    let formatting = if line.formatting.is_empty() {
                        DEFAULT_RUN_FORMATTING
                    } else {
                        line.formatting.as_str()
                    };
                    format!("{}\\nosupersub {}", formatting, escape_unicode(&line.text))
                })
                .collect(),
        };

        format!(
            "{{\\rtf1\\ansi\\uc1\\deff0{{\\fonttbl{{\\f0\\fnil Arial;}}}}\\pard\\qc\\sa0\\sb0\\fs{}\\f0 {}}}",
            self.font_size,
            paragraphs.join(PARAGRAPH_BREAK)
        )
    }
}

/// Tier for an info slide line that carries no formatting of its own.
fn positional_intro_formatting(index: usize) -> &'static str {
    match index {
        0 => INTRO_REFERENCE_FORMATTING,
        1 => INTRO_TITLE_FORMATTING,
        _ => INTRO_DETAIL_FORMATTING,
    }
}
