//! Presentation document model.
//!
//! A [`PresentationFile`] is the decoded on-disk structure: a list of cues plus
//! one or more groups of cue identifiers that index them. A [`Document`] is the
//! in-memory form the editor works on, where every cue is stored together with
//! its identifier so that the two can never drift apart. The two sequences are
//! only split again by [`Document::into_file`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Opaque cue identifier (a UUID string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CCLI block shown by the stage display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ccli {
    pub author: String,
    pub song_number: u32,
    pub song_title: String,
    pub display: bool,
}

/// Decoded presentation as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresentationFile {
    #[serde(default)]
    pub uuid: Option<Identifier>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub ccli: Option<Ccli>,

    #[serde(default)]
    pub cues: Vec<Cue>,

    #[serde(default)]
    pub cue_groups: Vec<CueGroup>,
}

/// An ordered group of cue identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueGroup {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub identifiers: Vec<Identifier>,
}

/// A timeline entry carrying one or more actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub uuid: Identifier,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Cue {
    /// Create an enabled cue with a fresh identifier.
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            uuid: Identifier::generate(),
            name: String::new(),
            enabled: true,
            actions,
        }
    }

    /// The first slide action, if any.
    pub fn first_slide(&self) -> Option<&SlideAction> {
        match self.actions.first() {
            Some(Action::Slide(slide)) => Some(slide),
            _ => None,
        }
    }
}

/// An effect triggered by a cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Slide(SlideAction),
    Media(ActionInfo),
    Message(ActionInfo),
    Clear(ActionInfo),
    Stage(ActionInfo),
}

impl Action {
    /// Short kind name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Slide(_) => "slide",
            Action::Media(_) => "media",
            Action::Message(_) => "message",
            Action::Clear(_) => "clear",
            Action::Stage(_) => "stage",
        }
    }
}

/// Common fields of actions that carry no slide text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionInfo {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub enabled: bool,
}

/// An action that shows a slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideAction {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub transition: Option<Transition>,

    pub slide: Slide,
}

/// Slide transition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: f64,

    #[serde(default)]
    pub effect: String,
}

/// Visual content of a slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub size: Size,

    #[serde(default)]
    pub draws_background_color: bool,

    #[serde(default)]
    pub background_color: Color,

    #[serde(default)]
    pub elements: Vec<SlideElement>,
}

impl Slide {
    /// Text of the first element, which holds the slide's visible content.
    pub fn text_mut(&mut self) -> Option<&mut TextElement> {
        self.elements.first_mut().and_then(|e| e.text.as_mut())
    }

    pub fn text(&self) -> Option<&TextElement> {
        self.elements.first().and_then(|e| e.text.as_ref())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

/// RGBA color with components in 0..=1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };
}

/// A positioned element on a slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideElement {
    #[serde(default)]
    pub bounds: Rect,

    #[serde(default)]
    pub text: Option<TextElement>,
}

/// A text box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(default)]
    pub attributes: TextAttributes,

    /// Rich-text markup blob.
    #[serde(default)]
    pub rtf_data: String,

    #[serde(default)]
    pub scale_behavior: ScaleBehavior,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleBehavior {
    #[default]
    None,
    ScaleFontDown,
    ScaleFontUpDown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAttributes {
    #[serde(default)]
    pub font: Font,

    #[serde(default)]
    pub fill: Color,

    #[serde(default)]
    pub stroke_width: f64,

    #[serde(default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    pub family: String,
    pub face: String,
}

/// Per-range text attribute override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub range_start: usize,
    pub range_end: usize,
    pub original_font_size: f64,
}

/// A cue stored together with its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct CueEntry {
    pub cue: Cue,
    identifier: Identifier,
}

impl CueEntry {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

/// In-memory presentation with cues and identifiers kept in lockstep.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub uuid: Option<Identifier>,
    pub name: String,
    pub ccli: Option<Ccli>,
    group: Option<String>,
    entries: Vec<CueEntry>,
}

impl Document {
    /// Pair cues with the identifiers of all groups, flattened in order.
    ///
    /// Every identifier must name the cue at its position.
    pub fn from_file(file: PresentationFile) -> Result<Self> {
        let group = file.cue_groups.first().map(|g| g.name.clone());
        let identifiers: Vec<Identifier> = file
            .cue_groups
            .into_iter()
            .flat_map(|g| g.identifiers)
            .collect();

        if identifiers.len() != file.cues.len() {
            return Err(Error::IdentifierMismatch {
                cues: file.cues.len(),
                identifiers: identifiers.len(),
            });
        }

        let mut entries = Vec::with_capacity(file.cues.len());
        for (i, (cue, identifier)) in file.cues.into_iter().zip(identifiers).enumerate() {
            if cue.uuid != identifier {
                return Err(Error::IdentifierOutOfOrder {
                    position: i + 1,
                    cue: cue.uuid.to_string(),
                    identifier: identifier.to_string(),
                });
            }
            entries.push(CueEntry { cue, identifier });
        }

        Ok(Self {
            uuid: file.uuid,
            name: file.name,
            ccli: file.ccli,
            group,
            entries,
        })
    }

    /// Split back into the on-disk structure with a single identifier group.
    pub fn into_file(self) -> PresentationFile {
        let mut cues = Vec::with_capacity(self.entries.len());
        let mut identifiers = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            cues.push(entry.cue);
            identifiers.push(entry.identifier);
        }

        let cue_groups = match self.group {
            Some(name) => vec![CueGroup { name, identifiers }],
            None => Vec::new(),
        };

        PresentationFile {
            uuid: self.uuid,
            name: self.name,
            ccli: self.ccli,
            cues,
            cue_groups,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CueEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [CueEntry] {
        &mut self.entries
    }

    pub fn cues(&self) -> impl Iterator<Item = &Cue> {
        self.entries.iter().map(|e| &e.cue)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().map(|e| &e.identifier)
    }

    pub fn has_group(&self) -> bool {
        self.group.is_some()
    }

    /// Replace all identifier groups with one unnamed group.
    pub fn reset_group(&mut self) {
        self.group = Some(String::new());
    }

    /// Insert a cue at `index` under a freshly generated identifier.
    ///
    /// The cue's own uuid is replaced by the new identifier.
    pub fn insert(&mut self, mut cue: Cue, index: usize) -> Result<&Identifier> {
        if index > self.entries.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        if self.group.is_none() {
            self.group = Some(String::new());
        }

        let identifier = Identifier::generate();
        cue.uuid = identifier.clone();
        self.entries.insert(index, CueEntry { cue, identifier });
        Ok(&self.entries[index].identifier)
    }

    /// Remove the cue at `index` together with its identifier.
    pub fn remove(&mut self, index: usize) -> Option<CueEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(id: &str) -> Cue {
        Cue {
            uuid: Identifier::from(id),
            name: String::new(),
            enabled: false,
            actions: Vec::new(),
        }
    }

    fn file(ids: &[&str], groups: Vec<Vec<&str>>) -> PresentationFile {
        PresentationFile {
            cues: ids.iter().map(|id| cue(id)).collect(),
            cue_groups: groups
                .into_iter()
                .map(|g| CueGroup {
                    name: "Verse".to_string(),
                    identifiers: g.into_iter().map(Identifier::from).collect(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn ids(doc: &Document) -> Vec<String> {
        doc.identifiers().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_from_file_flattens_groups() {
        let doc = Document::from_file(file(&["A", "B", "C"], vec![vec!["A"], vec!["B", "C"]]))
            .unwrap();
        assert_eq!(ids(&doc), vec!["A", "B", "C"]);

        let out = doc.into_file();
        assert_eq!(out.cue_groups.len(), 1);
        assert_eq!(out.cue_groups[0].identifiers.len(), 3);
        assert_eq!(out.cues.len(), 3);
    }

    #[test]
    fn test_from_file_rejects_mismatch() {
        let result = Document::from_file(file(&["A", "B"], vec![vec!["A"]]));
        assert!(matches!(
            result,
            Err(Error::IdentifierMismatch {
                cues: 2,
                identifiers: 1
            })
        ));
    }

    #[test]
    fn test_from_file_rejects_groups_out_of_cue_order() {
        let result = Document::from_file(file(&["A", "B"], vec![vec!["B"], vec!["A"]]));
        match result {
            Err(Error::IdentifierOutOfOrder {
                position,
                cue,
                identifier,
            }) => {
                assert_eq!(position, 1);
                assert_eq!(cue, "A");
                assert_eq!(identifier, "B");
            }
            other => panic!("expected out-of-order error, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut doc =
            Document::from_file(file(&["A", "B"], vec![vec!["A", "B"]])).unwrap();
        let new_id = doc.insert(cue("X"), 1).unwrap().clone();

        assert_eq!(doc.len(), 3);
        let list = ids(&doc);
        assert_eq!(list[0], "A");
        assert_eq!(list[1], new_id.to_string());
        assert_eq!(list[2], "B");
        assert_eq!(doc.entries()[1].cue.uuid, new_id);
        assert_ne!(new_id, Identifier::from("X"));
    }

    #[test]
    fn test_insert_creates_group() {
        let mut doc = Document::default();
        assert!(!doc.has_group());

        doc.insert(cue("X"), 0).unwrap();
        assert!(doc.has_group());

        let out = doc.into_file();
        assert_eq!(out.cue_groups.len(), 1);
        assert_eq!(out.cue_groups[0].identifiers.len(), 1);
        assert_eq!(out.cue_groups[0].identifiers[0], out.cues[0].uuid);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut doc = Document::default();
        assert!(matches!(
            doc.insert(cue("X"), 1),
            Err(Error::IndexOutOfRange { index: 1, len: 0 })
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_remove_takes_identifier() {
        let mut doc =
            Document::from_file(file(&["A", "B", "C"], vec![vec!["A", "B", "C"]])).unwrap();
        let removed = doc.remove(1).unwrap();
        assert_eq!(removed.identifier().as_str(), "B");
        assert_eq!(ids(&doc), vec!["A", "C"]);
        assert!(doc.remove(5).is_none());
    }

    #[test]
    fn test_generated_identifiers_are_unique() {
        assert_ne!(Identifier::generate(), Identifier::generate());
    }

    #[test]
    fn test_action_tagging() {
        let action = Action::Media(ActionInfo::default());
        assert_eq!(action.kind(), "media");
    }
}
