//! Page geometry and text measurement used by the flow layout.
//!
//! ```
//! use invoice_gen::{Cm, Page, Pt};
//! use invoice_gen::layout::Margins;
//! use invoice_gen::pagesize;
//!
//! let page = Page::new(pagesize::A4, Some(Margins::all(Cm(1.0))));
//! let inset: Pt = Cm(1.0).into();
//! assert_eq!(page.content_box.x1, inset);
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
