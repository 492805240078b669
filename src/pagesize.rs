//! Page sizes, in portrait orientation (width, height).
//!
//! ```
//! use invoice_gen::pagesize::A4;
//!
//! assert!((*A4.0 - 595.28).abs() < 0.01);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// iso a-series (converted from mm to points)
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
