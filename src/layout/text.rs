use crate::font::Font;
use crate::units::Pt;

/// Calculate the width of a given string of text given the font and font size.
/// Characters the font doesn't have are measured as whatever will be drawn in
/// their place.
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| font.advance(ch, size))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::BUNDLED_FONT;

    #[test]
    fn width_is_additive() {
        let font = Font::load(BUNDLED_FONT.to_vec()).unwrap();
        let a = width_of_text("Račun", &font, Pt(12.0));
        let b = width_of_text(" br. 1", &font, Pt(12.0));
        let ab = width_of_text("Račun br. 1", &font, Pt(12.0));
        assert!((*ab - (*a + *b)).abs() < 1e-3);
        assert_eq!(width_of_text("", &font, Pt(12.0)), Pt(0.0));
    }
}
