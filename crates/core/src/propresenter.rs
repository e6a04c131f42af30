//! Fixed visual template applied to every slide.
//!
//! Every slide gets the same canvas, background, text box, and font, so a
//! library processed with this tool looks uniform regardless of which
//! version of the presentation software produced each file.

use crate::document::{Color, Font, Point, Rect, Size, Slide};
use crate::error::{Error, Result};

pub const SLIDE_WIDTH: f64 = 1920.0;
pub const SLIDE_HEIGHT: f64 = 1080.0;
pub const SLIDE_MARGIN: f64 = 30.0;

pub const TEMPLATE_FONT_NAME: &str = "ArialMT";
pub const TEMPLATE_FONT_FAMILY: &str = "Arial";
pub const TEMPLATE_FONT_FACE: &str = "Regular";

/// Visual settings forced onto slides.
#[derive(Debug, Clone)]
pub struct SlideTemplate {
    size: Size,
    margin: f64,
    background: Color,
    text_color: Color,
    font: Font,
}

impl Default for SlideTemplate {
    fn default() -> Self {
        Self {
            size: Size {
                width: SLIDE_WIDTH,
                height: SLIDE_HEIGHT,
            },
            margin: SLIDE_MARGIN,
            background: Color::WHITE,
            text_color: Color::BLACK,
            font: Font {
                name: TEMPLATE_FONT_NAME.to_string(),
                family: TEMPLATE_FONT_FAMILY.to_string(),
                face: TEMPLATE_FONT_FACE.to_string(),
            },
        }
    }
}

impl SlideTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the template, keeping only the first (main text) element.
    ///
    /// `position` is the 1-based cue position, used in the error when the
    /// slide has no text element to style.
    pub fn apply(&self, slide: &mut Slide, position: usize) -> Result<()> {
        slide.size = self.size;
        slide.draws_background_color = true;
        slide.background_color = self.background;

        slide.elements.truncate(1);
        let element = slide
            .elements
            .first_mut()
            .ok_or(Error::MissingTextElement { slide: position })?;

        element.bounds = Rect {
            origin: Point {
                x: self.margin,
                y: self.margin,
            },
            size: Size {
                width: self.size.width - 2.0 * self.margin,
                height: self.size.height - 2.0 * self.margin,
            },
        };

        let text = element
            .text
            .as_mut()
            .ok_or(Error::MissingTextElement { slide: position })?;

        text.attributes.font = self.font.clone();
        text.attributes.fill = self.text_color;
        text.attributes.stroke_width = 0.0;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{SlideElement, TextElement};

    fn slide_with_elements(n: usize) -> Slide {
        Slide {
            elements: (0..n)
                .map(|_| SlideElement {
                    text: Some(TextElement::default()),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_template() {
        let mut slide = slide_with_elements(3);
        SlideTemplate::new().apply(&mut slide, 1).unwrap();

        assert_eq!(slide.elements.len(), 1);
        assert_eq!(slide.size.width, 1920.0);
        assert!(slide.draws_background_color);
        assert_eq!(slide.background_color, Color::WHITE);

        let bounds = slide.elements[0].bounds;
        assert_eq!(bounds.origin.x, 30.0);
        assert_eq!(bounds.size.width, 1860.0);
        assert_eq!(bounds.size.height, 1020.0);

        let text = slide.text().unwrap();
        assert_eq!(text.attributes.font.name, "ArialMT");
        assert_eq!(text.attributes.font.family, "Arial");
        assert_eq!(text.attributes.fill, Color::BLACK);
        assert_eq!(text.attributes.stroke_width, 0.0);
    }

    #[test]
    fn test_missing_element() {
        let mut slide = slide_with_elements(0);
        assert!(matches!(
            SlideTemplate::new().apply(&mut slide, 4),
            Err(Error::MissingTextElement { slide: 4 })
        ));

        let mut slide = Slide {
            elements: vec![SlideElement::default()],
            ..Default::default()
        };
        assert!(SlideTemplate::new().apply(&mut slide, 1).is_err());
    }
}
