use crate::colour::{colours, Colour};
use crate::fonts::DEFAULT_FONT;
use crate::units::Pt;

/// Horizontal alignment of a line of text within the space available to it
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Offset from the left edge of `available` needed to align something `width` wide
    pub fn offset(&self, available: Pt, width: Pt) -> Pt {
        match self {
            Alignment::Left => Pt(0.0),
            Alignment::Center => (available - width) / 2.0,
            Alignment::Right => available - width,
        }
    }
}

/// How a paragraph is set: which font, what size, how far apart the lines are, and
/// how each line is aligned
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub name: String,
    /// Logical font name, see [crate::fonts]
    pub font_name: String,
    pub font_size: Pt,
    /// Minimum distance from one baseline to the next
    pub leading: Pt,
    pub alignment: Alignment,
    pub colour: Colour,
}

impl ParagraphStyle {
    /// A left-aligned 10pt style in the default font
    pub fn new<S: ToString>(name: S) -> ParagraphStyle {
        ParagraphStyle {
            name: name.to_string(),
            font_name: DEFAULT_FONT.to_string(),
            font_size: Pt(10.0),
            leading: Pt(12.0),
            alignment: Alignment::Left,
            colour: colours::BLACK,
        }
    }

    /// Copy this style under a new name
    pub fn derive<S: ToString>(&self, name: S) -> ParagraphStyle {
        ParagraphStyle {
            name: name.to_string(),
            ..self.clone()
        }
    }

    pub fn with_font<S: ToString>(mut self, font_name: S) -> Self {
        self.font_name = font_name.to_string();
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}
