//! Font size resolution for slide markup.
//!
//! Sizes in markup are in half-points (`\fs180` is 90 pt as shown in the
//! presentation editor), so candidates are shown halved, with odd sizes as
//! `N.5`.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::decision::DecisionProvider;
use crate::error::{Error, Result};

/// Size used when markup carries no size at all (90 pt).
pub const DEFAULT_FONT_SIZE: u32 = 180;

static FONT_SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\fs(\d+)").unwrap());

/// Distinct `\fsN` sizes found in `rtf`.
pub fn font_sizes(rtf: &str) -> BTreeSet<u32> {
    FONT_SIZE_REGEX
        .captures_iter(rtf)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Picks one font size per slide, preferring the size already used earlier
/// in the same document.
#[derive(Debug, Clone, Default)]
pub struct FontSizeResolver {
    remembered: Option<u32>,
}

impl FontSizeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The size the previous slides settled on.
    pub fn remembered(&self) -> Option<u32> {
        self.remembered
    }

    /// Resolve the size for one slide.
    ///
    /// `context` names the slide in prompts and log messages.
    pub fn resolve(
        &mut self,
        rtf: &str,
        decisions: &mut dyn DecisionProvider,
        context: &str,
    ) -> Result<u32> {
        let sizes = font_sizes(rtf);

        let size = match sizes.len() {
            0 => return Ok(DEFAULT_FONT_SIZE),
            1 => sizes.into_iter().next().unwrap_or(DEFAULT_FONT_SIZE),
            _ => match self.remembered {
                Some(size) if sizes.contains(&size) => size,
                remembered => Self::ask(sizes, remembered, decisions, context)?,
            },
        };

        self.remembered = Some(size);
        Ok(size)
    }

    fn ask(
        mut sizes: BTreeSet<u32>,
        remembered: Option<u32>,
        decisions: &mut dyn DecisionProvider,
        context: &str,
    ) -> Result<u32> {
        let shown: Vec<String> = sizes.iter().copied().map(display_size).collect();
        log::warn!("{} has several font sizes: {:?}", context, shown);

        let prompt = match remembered {
            Some(size) => {
                sizes.insert(size);
                format!(
                    "{} has several font sizes (other slides use {}). Choose size:",
                    context,
                    display_size(size)
                )
            }
            None => format!("{} has several font sizes. Choose size:", context),
        };

        let sizes: Vec<u32> = sizes.into_iter().collect();
        let candidates: Vec<String> = sizes.iter().copied().map(display_size).collect();
        let answer = decisions.decide(&prompt, &candidates);

        match candidates.iter().position(|c| c == answer.trim()) {
            Some(i) => Ok(sizes[i]),
            None => Err(Error::InvalidDecision { answer, candidates }),
        }
    }
}

/// A markup size as shown in the presentation editor, in points.
fn display_size(size: u32) -> String {
    if size % 2 == 0 {
        (size / 2).to_string()
    } else {
        format!("{}.5", size / 2)
    }
}
