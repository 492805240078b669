//! Physical units used to measure pages and content.
//!
//! All layout happens in [`Pt`] (PDF points, 1/72 of an inch). The other units
//! exist to make page geometry readable and convert into points via [`From`].
//!
//! ```
//! use invoice_gen::{Cm, In, Pt};
//!
//! let margin: Pt = Cm(1.0).into();
//! assert!((*margin - 28.346_457).abs() < 1e-3);
//! assert_eq!(Pt::from(In(1.0)), Pt(72.0));
//! ```

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, MulAssign, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in PDF points
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    MulAssign,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
    Sum,
)]
pub struct Pt(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From)]
pub struct In(pub f32);

/// A length in centimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From)]
pub struct Cm(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Display, From)]
pub struct Mm(pub f32);

impl Pt {
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Div<Pt> for Pt {
    type Output = Pt;

    fn div(self, rhs: Pt) -> Pt {
        Pt(self.0 / rhs.0)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

impl From<Cm> for Pt {
    fn from(value: Cm) -> Self {
        Pt(value.0 * 72.0 / 2.54)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}
