//! Domain types for slide lines and the metadata that drives cleanup.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::Ccli;
use crate::rtf::{INTRO_DETAIL_FORMATTING, INTRO_REFERENCE_FORMATTING, INTRO_TITLE_FORMATTING};

/// A single line of slide text with the formatting prefix it was found with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedLine {
    /// Opaque markup prefix, carried through cleanup unchanged.
    pub formatting: String,

    /// The visible text of the line.
    pub text: String,
}

impl FormattedLine {
    /// Create a new line.
    pub fn new(formatting: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            formatting: formatting.into(),
            text: text.into(),
        }
    }

    /// Create a line without formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(String::new(), text)
    }

    /// A line with the same formatting as `self` but different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(self.formatting.clone(), text)
    }

    /// Whether the visible text is empty.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for FormattedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.formatting, self.text)
    }
}

/// A song, either from a songbook (book and number set) or unattached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Songbook code, e.g. "DDS".
    pub book: Option<String>,

    /// Number within the songbook.
    pub number: Option<u32>,

    /// Song title.
    pub title: String,

    /// Authors, melody, and other detail lines.
    pub info: Vec<String>,
}

impl Song {
    /// Create a songbook song.
    pub fn new(
        book: impl Into<String>,
        number: u32,
        title: impl Into<String>,
        info: Vec<String>,
    ) -> Self {
        Self {
            book: Some(book.into()),
            number: Some(number),
            title: title.into(),
            info,
        }
    }

    /// Create a song that does not belong to a songbook.
    pub fn unattached(title: impl Into<String>, info: Vec<String>) -> Self {
        Self {
            book: None,
            number: None,
            title: title.into(),
            info,
        }
    }

    /// Book and number, when both are present.
    pub fn songbook_entry(&self) -> Option<(&str, u32)> {
        match (self.book.as_deref(), self.number) {
            (Some(book), Some(number)) if !book.is_empty() && number > 0 => Some((book, number)),
            _ => None,
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.songbook_entry() {
            Some((book, number)) => write!(f, "{} {}: {}", book, number, self.title)?,
            None => write!(f, "{}", self.title)?,
        }
        for line in &self.info {
            write!(f, "\n  {}", line)?;
        }
        Ok(())
    }
}

/// A bare scripture reference, e.g. "Rom 10, 1-8".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The reference as displayed.
    pub label: String,
}

impl Reference {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Metadata attached to a presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Song(Song),
    Reference(Reference),
}

impl Content {
    /// Book and number, when this is a songbook song.
    pub fn songbook_entry(&self) -> Option<(&str, u32)> {
        match self {
            Content::Song(song) => song.songbook_entry(),
            Content::Reference(_) => None,
        }
    }

    /// Detail lines to filter out of slide bodies.
    pub fn info(&self) -> &[String] {
        match self {
            Content::Song(song) => &song.info,
            Content::Reference(_) => &[],
        }
    }

    /// Short label used in log messages, e.g. "DDS 007".
    pub fn label(&self) -> String {
        match self {
            Content::Song(song) => match song.songbook_entry() {
                Some((book, number)) => format!("{} {:03}", book, number),
                None => song.title.clone(),
            },
            Content::Reference(reference) => reference.label.clone(),
        }
    }

    /// Name given to the presentation itself.
    pub fn presentation_name(&self) -> String {
        match self {
            Content::Song(song) => match song.songbook_entry() {
                Some((book, number)) => format!("{} {:03} - {}", book, number, song.title),
                None => song.title.clone(),
            },
            Content::Reference(reference) => reference.label.clone(),
        }
    }

    /// CCLI block for the presentation.
    pub fn ccli(&self) -> Ccli {
        match self {
            Content::Song(song) => {
                let (author, number) = song
                    .songbook_entry()
                    .map(|(book, number)| (book.to_string(), number))
                    .unwrap_or_default();
                Ccli {
                    author,
                    song_number: number,
                    song_title: song.title.clone(),
                    display: true,
                }
            }
            Content::Reference(reference) => Ccli {
                author: "Bible".to_string(),
                song_number: 0,
                song_title: reference.label.clone(),
                display: true,
            },
        }
    }

    /// Raw lines for an info slide: reference line, title line, detail lines,
    /// each carrying the formatting of its tier.
    pub fn info_slide_lines(&self) -> Vec<FormattedLine> {
        match self {
            Content::Song(song) => {
                let mut lines = Vec::with_capacity(song.info.len() + 2);
                if let Some((book, number)) = song.songbook_entry() {
                    lines.push(FormattedLine::new(
                        INTRO_REFERENCE_FORMATTING,
                        format!("{} {}", book, number),
                    ));
                }
                lines.push(FormattedLine::new(INTRO_TITLE_FORMATTING, song.title.as_str()));
                lines.extend(
                    song.info
                        .iter()
                        .map(|line| FormattedLine::new(INTRO_DETAIL_FORMATTING, line.as_str())),
                );
                lines
            }
            Content::Reference(reference) => vec![FormattedLine::new(
                INTRO_REFERENCE_FORMATTING,
                reference.label.as_str(),
            )],
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Song(song) => song.fmt(f),
            Content::Reference(reference) => f.write_str(&reference.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_songbook_entry() {
        let song = Song::new("DDS", 7, "Title", vec![]);
        assert_eq!(song.songbook_entry(), Some(("DDS", 7)));

        let song = Song::unattached("Title", vec![]);
        assert_eq!(song.songbook_entry(), None);
    }

    #[test]
    fn test_presentation_name() {
        let content = Content::Song(Song::new("SOS", 42, "Lovsang", vec![]));
        assert_eq!(content.presentation_name(), "SOS 042 - Lovsang");
        assert_eq!(content.label(), "SOS 042");

        let content = Content::Reference(Reference::new("Rom 10, 1-8"));
        assert_eq!(content.presentation_name(), "Rom 10, 1-8");
    }

    #[test]
    fn test_ccli() {
        let ccli = Content::Song(Song::new("FS4", 3, "Titel", vec![])).ccli();
        assert_eq!(ccli.author, "FS4");
        assert_eq!(ccli.song_number, 3);
        assert!(ccli.display);

        let ccli = Content::Reference(Reference::new("Matt 22, 1")).ccli();
        assert_eq!(ccli.author, "Bible");
        assert_eq!(ccli.song_number, 0);
        assert_eq!(ccli.song_title, "Matt 22, 1");
    }

    #[test]
    fn test_info_slide_lines() {
        let song = Song::new("DDS", 7, "Title", vec!["Author".to_string()]);
        let texts: Vec<String> = Content::Song(song)
            .info_slide_lines()
            .into_iter()
            .map(|l| l.text)
            .collect();
        assert_eq!(texts, vec!["DDS 7", "Title", "Author"]);

        let song = Song::unattached("Title", vec!["Author".to_string()]);
        let lines = Content::Song(song).info_slide_lines();
        assert_eq!(
            lines,
            vec![
                FormattedLine::new(INTRO_TITLE_FORMATTING, "Title"),
                FormattedLine::new(INTRO_DETAIL_FORMATTING, "Author"),
            ]
        );
    }

    #[test]
    fn test_song_display() {
        let song = Song::new("DDS", 1, "Title", vec!["A".to_string(), "B".to_string()]);
        assert_eq!(song.to_string(), "DDS 1: Title\n  A\n  B");
    }
}
