//! Info slides: a synthesized first slide showing the song's reference,
//! title, and detail lines.

use crate::document::{
    Action, Cue, CustomAttribute, Document, ScaleBehavior, Slide, SlideAction, SlideElement,
    TextElement,
};
use crate::error::Result;
use crate::normalize::{CleanMode, LineCleaner};
use crate::propresenter::SlideTemplate;
use crate::rtf::{RichTextComposer, INTRO_DETAIL_FORMATTING, INTRO_TITLE_FORMATTING};
use crate::types::Content;

/// Label that marks a cue as an info slide.
pub const INFO_SLIDE_LABEL: &str = "Infoslide";

/// Relative font sizes per line tier.
const REFERENCE_LINE_SIZE: f64 = 150.0;
const TITLE_LINE_SIZE: f64 = 100.0;
const DETAIL_LINE_SIZE: f64 = 70.0;

/// Whether the document already starts with an info slide.
pub fn has_info_slide(document: &Document) -> bool {
    document
        .cues()
        .next()
        .and_then(Cue::first_slide)
        .is_some_and(|slide| slide.label == INFO_SLIDE_LABEL)
}

/// Build an info slide cue for `content`.
pub fn build_info_slide(content: &Content) -> Result<Cue> {
    let lines = LineCleaner::new(CleanMode::Intro).clean(content.info_slide_lines(), None);

    let mut custom_attributes = Vec::with_capacity(lines.len());
    let mut start = 0;
    for line in &lines {
        let len = line.text.chars().count();
        let size = match line.formatting.as_str() {
            INTRO_TITLE_FORMATTING => TITLE_LINE_SIZE,
            INTRO_DETAIL_FORMATTING => DETAIL_LINE_SIZE,
            _ => REFERENCE_LINE_SIZE,
        };
        custom_attributes.push(CustomAttribute {
            range_start: start,
            range_end: start + len,
            original_font_size: size,
        });
        start += len + 1;
    }

    let mut text = TextElement {
        rtf_data: RichTextComposer::intro().compose(&lines),
        scale_behavior: ScaleBehavior::ScaleFontDown,
        ..Default::default()
    };
    text.attributes.custom_attributes = custom_attributes;

    let mut slide = Slide {
        elements: vec![SlideElement {
            text: Some(text),
            ..Default::default()
        }],
        ..Default::default()
    };
    SlideTemplate::new().apply(&mut slide, 1)?;

    let action = SlideAction {
        enabled: true,
        label: INFO_SLIDE_LABEL.to_string(),
        transition: None,
        slide,
    };

    Ok(Cue::new(vec![Action::Slide(action)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PresentationFile;
    use crate::types::{Reference, Song};

    fn song() -> Content {
        Content::Song(Song::new(
            "DDS",
            7,
            "Kirken den er et gammelt hus",
            vec!["Tekst: Grundtvig".to_string(), "".to_string(), "Melodi: Lindeman".to_string()],
        ))
    }

    #[test]
    fn test_build_info_slide() {
        let cue = build_info_slide(&song()).unwrap();
        assert!(cue.enabled);
        assert_eq!(cue.name, "");

        let action = cue.first_slide().unwrap();
        assert_eq!(action.label, INFO_SLIDE_LABEL);

        let text = action.slide.text().unwrap();
        assert_eq!(text.scale_behavior, ScaleBehavior::ScaleFontDown);
        assert!(text.rtf_data.contains(r"\sl288\slmult1 DDS 7\par "));
        assert!(text.rtf_data.contains(r"\sl360\slmult1 Kirken den er et gammelt hus\par "));
        assert!(text.rtf_data.contains(r"\sl288\slmult1\i Tekst: Grundtvig\par "));
        assert!(text.rtf_data.ends_with(r"\sl288\slmult1\i Melodi: Lindeman}"));
    }

    #[test]
    fn test_custom_attribute_ranges() {
        let cue = build_info_slide(&song()).unwrap();
        let attrs = &cue.first_slide().unwrap().slide.text().unwrap().attributes.custom_attributes;

        // The blank info line is dropped, leaving four lines.
        assert_eq!(attrs.len(), 4);
        assert_eq!((attrs[0].range_start, attrs[0].range_end), (0, 5));
        assert_eq!((attrs[1].range_start, attrs[1].range_end), (6, 34));
        assert_eq!(attrs[0].original_font_size, 150.0);
        assert_eq!(attrs[1].original_font_size, 100.0);
        assert_eq!(attrs[2].original_font_size, 70.0);
        assert_eq!(attrs[3].original_font_size, 70.0);
    }

    #[test]
    fn test_unattached_song_info_slide() {
        let content = Content::Song(Song::unattached("Titel", vec!["Tekst: X".to_string()]));
        let cue = build_info_slide(&content).unwrap();
        let text = cue.first_slide().unwrap().slide.text().unwrap();

        assert!(text
            .rtf_data
            .contains(r"\f0 \sl360\slmult1 Titel\par \sl288\slmult1\i Tekst: X}"));
        let sizes: Vec<f64> = text
            .attributes
            .custom_attributes
            .iter()
            .map(|a| a.original_font_size)
            .collect();
        assert_eq!(sizes, vec![100.0, 70.0]);
    }

    #[test]
    fn test_reference_info_slide() {
        let content = Content::Reference(Reference::new("Rom 10, 1-8"));
        let cue = build_info_slide(&content).unwrap();
        let text = cue.first_slide().unwrap().slide.text().unwrap();
        assert_eq!(text.attributes.custom_attributes.len(), 1);
        assert!(text.rtf_data.contains(r"\sl288\slmult1 Rom 10, 1-8}"));
    }

    #[test]
    fn test_has_info_slide() {
        let mut doc = Document::from_file(PresentationFile::default()).unwrap();
        assert!(!has_info_slide(&doc));

        doc.insert(build_info_slide(&song()).unwrap(), 0).unwrap();
        assert!(has_info_slide(&doc));
    }
}
