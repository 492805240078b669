use crate::units::Pt;

/// Margins around the edge of a page. They don't prevent anything from being drawn
/// outside of them; they determine the content box that layout works within, or,
/// for content margins, the `ArtBox` written for each page.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl<P: Into<Pt>>(top: P, right: P, bottom: P, left: P) -> Margins {
        Margins {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create margins where all values are equal
    pub fn all<P: Into<Pt>>(value: P) -> Margins {
        let value = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<P: Into<Pt>>(vertical: P, horizontal: P) -> Margins {
        let vertical = vertical.into();
        let horizontal = horizontal.into();
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cm;

    #[test]
    fn margins_accept_any_unit() {
        let m = Margins::all(Cm(1.0));
        assert_eq!(m.top, Pt::from(Cm(1.0)));
        assert_eq!(m, Margins::trbl(Cm(1.0), Cm(1.0), Cm(1.0), Cm(1.0)));
        assert_eq!(Margins::symmetric(Pt(1.0), Pt(2.0)).right, Pt(2.0));
    }
}
