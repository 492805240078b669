//! Generate paginated PDF invoices.
//!
//! The [InvoiceDocument] builder fills a fixed invoice layout (seller, buyer,
//! invoice number and date, an itemised table with a total, a tax note and a
//! signature block) and hands it to the [flow] layout engine, which pours it onto
//! A4 pages and writes the PDF.
//!
//! ```no_run
//! use invoice_gen::{InvoiceDocument, Item};
//!
//! let mut invoice = InvoiceDocument::new("invoice.pdf").unwrap();
//! invoice.buyer.name = "ACME d.o.o.".to_string();
//! invoice.info.num = "2024-17".to_string();
//! invoice.info.items.push(Item::parse("Membership fee", "35.50").unwrap());
//! invoice.populate().unwrap();
//! invoice.create().unwrap();
//! ```

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// The process-wide registry of fonts available to layout, by name
pub mod fonts;

/// Flow layout: paragraphs, tables and spacers paginated onto pages
pub mod flow;

mod info;
pub use info::*;

mod invoice;
pub use invoice::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
