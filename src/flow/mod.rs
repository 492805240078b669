//! Flowing layout: a sequence of blocks poured, top to bottom, into a frame on
//! each page of a [DocTemplate], starting new pages as needed.
//!
//! ```
//! use invoice_gen::flow::{DocTemplate, FlowBlock, Paragraph, ParagraphStyle};
//! use invoice_gen::{fonts, Cm};
//!
//! fonts::register_default().unwrap();
//! let normal = ParagraphStyle::new("Normal");
//! let flow = vec![
//!     FlowBlock::Paragraph(Paragraph::new("<font size=16>Hello</font>", &normal)),
//!     FlowBlock::spacer(Cm(1.0)),
//!     FlowBlock::PageBreak,
//!     FlowBlock::Paragraph(Paragraph::new("world", &normal)),
//! ];
//!
//! let document = DocTemplate::default().layout(&flow).unwrap();
//! assert_eq!(document.page_count(), 2);
//! ```

pub mod markup;
mod paragraph;
mod style;
mod table;
mod template;

pub use paragraph::*;
pub use style::*;
pub use table::*;
pub use template::*;

use crate::units::Pt;

/// A unit of content in a flow
#[derive(Debug, Clone, PartialEq)]
pub enum FlowBlock {
    Paragraph(Paragraph),
    /// Empty vertical space
    Spacer(Pt),
    Table(Table),
    /// Continue the flow at the top of a new page
    PageBreak,
}

impl FlowBlock {
    pub fn spacer<P: Into<Pt>>(height: P) -> FlowBlock {
        FlowBlock::Spacer(height.into())
    }
}

impl From<Paragraph> for FlowBlock {
    fn from(paragraph: Paragraph) -> Self {
        FlowBlock::Paragraph(paragraph)
    }
}

impl From<Table> for FlowBlock {
    fn from(table: Table) -> Self {
        FlowBlock::Table(table)
    }
}
