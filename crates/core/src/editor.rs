//! Document-level slide editing.
//!
//! The sweep walks the cues from last to first so that removing the current
//! cue never shifts the ones still to be visited. Removal always goes through
//! [`Document::remove`], which takes the cue and its identifier together.

use crate::decision::{is_no, DecisionProvider};
use crate::document::{Action, Cue, Document, Identifier, SlideAction};
use crate::error::{Error, Result};
use crate::font::FontSizeResolver;
use crate::normalize::{CleanMode, LineCleaner, ELLIPSIS};
use crate::propresenter::SlideTemplate;
use crate::rtf::{RichTextComposer, RichTextExtractor};
use crate::types::{Content, FormattedLine};

/// Marker appended to the last slide of a song.
pub const END_MARKER: &str = "-";

/// Behaviour switches for the sweep.
#[derive(Debug, Clone, Copy)]
pub struct EditorOptions {
    /// Ask before keeping slides that end up with a single line.
    pub check_single_lines: bool,

    /// Mark the last remaining slide with a trailing dash.
    pub mark_end: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            check_single_lines: true,
            mark_end: true,
        }
    }
}

/// Why a slide was taken out of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Nothing was left after cleanup.
    Empty,
    /// A single line was left and removal was confirmed.
    SingleLine,
}

/// A cue removed by the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedSlide {
    /// 1-based position in the document before the sweep.
    pub position: usize,
    pub identifier: Identifier,
    pub reason: RemovalReason,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Removed cues, in the order they were removed (last position first).
    pub removed: Vec<RemovedSlide>,
    /// Cues left in the document.
    pub remaining: usize,
}

/// Sweeps a document's slides, cleaning their text and dropping what is left
/// empty, while keeping cues and identifiers in step.
pub struct SlideDocumentEditor<'a> {
    decisions: &'a mut dyn DecisionProvider,
    options: EditorOptions,
    template: SlideTemplate,
    extractor: RichTextExtractor,
    cleaner: LineCleaner,
}

impl<'a> SlideDocumentEditor<'a> {
    pub fn new(decisions: &'a mut dyn DecisionProvider) -> Self {
        Self {
            decisions,
            options: EditorOptions::default(),
            template: SlideTemplate::new(),
            extractor: RichTextExtractor::new(),
            cleaner: LineCleaner::new(CleanMode::Body),
        }
    }

    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_template(mut self, template: SlideTemplate) -> Self {
        self.template = template;
        self
    }

    /// Clean every slide of `document` once.
    ///
    /// Afterwards the document has exactly one identifier group mirroring the
    /// surviving cues.
    pub fn sweep(
        &mut self,
        document: &mut Document,
        content: Option<&Content>,
    ) -> Result<SweepReport> {
        let label = match content {
            Some(content) => {
                document.name = content.presentation_name();
                document.ccli = Some(content.ccli());
                content.label()
            }
            None => document.name.clone(),
        };

        let mut fonts = FontSizeResolver::new();
        let mut report = SweepReport::default();

        for i in (0..document.len()).rev() {
            let is_last = i + 1 == document.len();
            let cue = &mut document.entries_mut()[i].cue;
            let outcome = self.process_cue(cue, i + 1, is_last, content, &mut fonts, &label)?;

            if let Some(reason) = outcome {
                if let Some(entry) = document.remove(i) {
                    report.removed.push(RemovedSlide {
                        position: i + 1,
                        identifier: entry.identifier().clone(),
                        reason,
                    });
                }
            }
        }

        document.reset_group();
        report.remaining = document.len();

        if document.is_empty() {
            log::warn!("{} - No slides remain after cleanup", label);
        } else {
            log::info!(
                "{} - {} slides kept, {} removed",
                label,
                report.remaining,
                report.removed.len()
            );
        }

        Ok(report)
    }

    /// Insert `cue` at `index` under a fresh identifier.
    pub fn insert(&self, document: &mut Document, cue: Cue, index: usize) -> Result<Identifier> {
        let identifier = document.insert(cue, index)?.clone();
        log::debug!("Inserted cue {} at position {}", identifier, index + 1);
        Ok(identifier)
    }

    /// Returns the reason the cue should be dropped, if it should.
    fn process_cue(
        &mut self,
        cue: &mut Cue,
        position: usize,
        is_last: bool,
        content: Option<&Content>,
        fonts: &mut FontSizeResolver,
        label: &str,
    ) -> Result<Option<RemovalReason>> {
        cue.enabled = true;

        for j in (0..cue.actions.len()).rev() {
            if let Action::Slide(action) = &mut cue.actions[j] {
                let outcome =
                    self.process_slide(action, position, is_last, content, fonts, label)?;
                if outcome.is_some() {
                    return Ok(outcome);
                }
            } else {
                let removed = cue.actions.remove(j);
                log::debug!(
                    "{} - Slide {}: removed {} action",
                    label,
                    position,
                    removed.kind()
                );
            }
        }

        Ok(None)
    }

    fn process_slide(
        &mut self,
        action: &mut SlideAction,
        position: usize,
        is_last: bool,
        content: Option<&Content>,
        fonts: &mut FontSizeResolver,
        label: &str,
    ) -> Result<Option<RemovalReason>> {
        action.enabled = true;
        action.transition = None;
        self.template.apply(&mut action.slide, position)?;

        let text = action
            .slide
            .text_mut()
            .ok_or(Error::MissingTextElement { slide: position })?;

        let context = format!("{} - Slide {}", label, position);
        let font_size = fonts.resolve(&text.rtf_data, &mut *self.decisions, &context)?;

        let lines = self.extractor.extract(&text.rtf_data);
        let mut cleaned = self.cleaner.clean(lines, content);

        if cleaned.is_empty() {
            log::warn!("{} is empty after cleanup and is removed", context);
            return Ok(Some(RemovalReason::Empty));
        }

        if cleaned.len() == 1 && self.options.check_single_lines {
            let prompt = format!(
                "{} has only one line:\n    \"{}\"\nRemove this slide? [Y/n]",
                context, cleaned[0].text
            );
            let answer = self.decisions.decide(&prompt, &[]);
            if !is_no(&answer) {
                log::warn!("{} is removed", context);
                return Ok(Some(RemovalReason::SingleLine));
            }
        }

        if is_last && self.options.mark_end {
            mark_end(&mut cleaned);
        }

        text.rtf_data = RichTextComposer::body(font_size).compose(&cleaned);
        Ok(None)
    }
}

/// Mark the last slide: an ellipsis slide gets its last line replaced by the
/// dash, anything else gets a dash below and a blank line above.
fn mark_end(lines: &mut Vec<FormattedLine>) {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return;
    };

    if first.text == ELLIPSIS {
        if let Some(last) = lines.last_mut() {
            last.text = END_MARKER.to_string();
        }
    } else {
        let dash = last.with_text(END_MARKER);
        let blank = first.with_text("");
        lines.push(dash);
        lines.insert(0, blank);
    }
}
