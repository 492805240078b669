use pdf_writer::Content;

/// A colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Use this colour for strokes (lines, rules) in the given content stream
    pub fn set_stroke(&self, content: &mut Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
            Colour::Grey { g } => content.set_stroke_gray(g),
        };
    }

    /// Use this colour for fills (including text) in the given content stream
    pub fn set_fill(&self, content: &mut Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
            Colour::Grey { g } => content.set_fill_gray(g),
        };
    }
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(colour: Colour, stroke: bool) -> String {
        let mut content = Content::new();
        if stroke {
            colour.set_stroke(&mut content);
        } else {
            colour.set_fill(&mut content);
        }
        let bytes = content.finish().to_vec();
        String::from_utf8_lossy(&bytes).trim().to_string()
    }

    #[test]
    fn writes_colour_operators() {
        assert_eq!(operators(Colour::new_rgb(1.0, 0.0, 0.0), false), "1 0 0 rg");
        assert_eq!(operators(Colour::new_rgb(0.0, 0.0, 1.0), true), "0 0 1 RG");
        assert_eq!(operators(Colour::new_grey(0.5), true), "0.5 G");
        assert_eq!(operators(Colour::default(), false), "0 g");
    }
}
