use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use log::debug;
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the laid out result of a flow: its pages and the fonts they use.
/// It is rendered out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, only the creator and
    /// creation date are written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Add a font to the document. Fonts are shared by every page, which refer to
    /// them by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The page at the given 0-based position in the document
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.page_order.get(index).and_then(|id| self.pages.get(*id))
    }

    /// All pages, in document order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Write the entire document to the writer. The whole PDF is rendered in memory
    /// first, so nothing is written if rendering fails.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        info.unwrap_or_default().write(&mut refs, &mut writer);

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        let bytes = writer.finish();
        debug!(
            "writing {} page(s), {} byte(s)",
            page_order.len(),
            bytes.len()
        );
        w.write_all(bytes.as_slice())?;
        w.flush()?;
        Ok(())
    }
}
