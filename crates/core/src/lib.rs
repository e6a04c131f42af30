//! Core document model, slide text cleanup, and slide editing for
//! ProPresenter presentations.

pub mod decision;
pub mod document;
pub mod editor;
pub mod error;
pub mod font;
pub mod infoslide;
pub mod normalize;
pub mod propresenter;
pub mod rtf;
pub mod types;

pub use decision::{is_no, is_yes, DecisionProvider, ScriptedDecisions};
pub use document::{
    Action, ActionInfo, Ccli, Cue, CueEntry, CueGroup, Document, Identifier, PresentationFile,
    SlideAction,
};
pub use editor::{EditorOptions, RemovalReason, RemovedSlide, SlideDocumentEditor, SweepReport};
pub use error::{Error, Result};
pub use font::FontSizeResolver;
pub use infoslide::{build_info_slide, has_info_slide, INFO_SLIDE_LABEL};
pub use normalize::{escape_hex, escape_unicode, CleanMode, LineCleaner};
pub use propresenter::SlideTemplate;
pub use rtf::{RichTextComposer, RichTextExtractor};
pub use types::{Content, FormattedLine, Reference, Song};
