use super::paragraph::{LineBox, Paragraph};
use super::table::{ResolvedRow, ResolvedTable, Table, CELL_PADDING_X, CELL_PADDING_Y};
use super::FlowBlock;
use crate::colour::colours;
use crate::document::Document;
use crate::font::Font;
use crate::fonts;
use crate::info::Info;
use crate::layout::{width_of_text, Margins};
use crate::page::{LineLayout, Page, SpanFont, SpanLayout};
use crate::pagesize::{self, PageSize};
use crate::rect::Rect;
use crate::units::{Cm, Pt};
use crate::PDFError;
use id_arena::Id;
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::io::Write;

/// Where things go on every page of a document
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub size: PageSize,
    /// Distance from the page edges to the layout frame
    pub margins: Margins,
    /// Distance from the page edges to where content is intended to sit, written to
    /// each page as its `ArtBox`
    pub content_margins: Margins,
    /// Space between the frame's edges and the content poured into it
    pub frame_padding: Pt,
}

impl Default for PageGeometry {
    /// A4, with 1cm page margins, 1.5cm content margins and 6pt of frame padding
    fn default() -> Self {
        PageGeometry {
            size: pagesize::A4,
            margins: Margins::all(Cm(1.0)),
            content_margins: Margins::all(Cm(1.5)),
            frame_padding: Pt(6.0),
        }
    }
}

impl PageGeometry {
    /// The area of each page that flow content is laid out in
    pub fn frame(&self) -> Rect {
        Page::new(self.size, Some(self.margins))
            .content_box
            .inset(self.frame_padding)
    }

    fn new_page(&self) -> Page {
        let mut page = Page::new(self.size, Some(self.margins));
        page.set_art_margins(&self.content_margins);
        page
    }
}

/// Lays out a flow of blocks into a paginated [Document]
#[derive(Debug, Clone, Default)]
pub struct DocTemplate {
    pub geometry: PageGeometry,
    pub info: Option<Info>,
}

impl DocTemplate {
    pub fn new(geometry: PageGeometry) -> DocTemplate {
        DocTemplate {
            geometry,
            info: None,
        }
    }

    pub fn with_info(mut self, info: Info) -> Self {
        self.info = Some(info);
        self
    }

    /// Paginate the flow. Fonts are looked up in the [crate::fonts] registry by the
    /// names the styles use, and each one is embedded once.
    pub fn layout(&self, flow: &[FlowBlock]) -> Result<Document, PDFError> {
        let mut layouter = Layouter::new(&self.geometry);
        if let Some(info) = &self.info {
            layouter.doc.set_info(info.clone());
        }

        for block in flow {
            match block {
                FlowBlock::Paragraph(paragraph) => layouter.paragraph(paragraph)?,
                FlowBlock::Spacer(height) => layouter.spacer(*height),
                FlowBlock::Table(table) => layouter.table(table)?,
                FlowBlock::PageBreak => layouter.finish_page(),
            }
        }

        let document = layouter.finish();
        debug!(
            "laid out {} block(s) on {} page(s)",
            flow.len(),
            document.page_count()
        );
        Ok(document)
    }

    /// Lay out the flow and write the resulting PDF
    pub fn build<W: Write>(&self, flow: &[FlowBlock], w: W) -> Result<(), PDFError> {
        self.layout(flow)?.write(w)
    }
}

struct Layouter<'g> {
    geometry: &'g PageGeometry,
    frame: Rect,
    doc: Document,
    font_ids: HashMap<String, Id<Font>>,
    page: Page,
    /// Top of the free space left in the frame
    cursor: Pt,
    /// Nothing has been placed on the current page yet
    fresh: bool,
}

impl<'g> Layouter<'g> {
    fn new(geometry: &'g PageGeometry) -> Layouter<'g> {
        let frame = geometry.frame();
        Layouter {
            geometry,
            frame,
            doc: Document::default(),
            font_ids: HashMap::new(),
            page: geometry.new_page(),
            cursor: frame.y2,
            fresh: true,
        }
    }

    fn remaining(&self) -> Pt {
        self.cursor - self.frame.y1
    }

    fn finish_page(&mut self) {
        let page = std::mem::replace(&mut self.page, self.geometry.new_page());
        self.doc.add_page(page);
        self.cursor = self.frame.y2;
        self.fresh = true;
        trace!("starting page {}", self.doc.page_count() + 1);
    }

    /// Make room for something `height` tall, moving to a new page if it doesn't fit
    /// here. Returns the top of the space it should be placed in.
    fn reserve(&mut self, height: Pt, what: &str) -> Pt {
        if height > self.remaining() && !self.fresh {
            self.finish_page();
        }
        if height > self.remaining() {
            warn!(
                "{what} ({height}pt) is taller than the page frame ({}pt), placing it anyway",
                self.remaining()
            );
        }
        let top = self.cursor;
        self.cursor -= height;
        self.fresh = false;
        top
    }

    fn font_id(&mut self, name: &str) -> Result<Id<Font>, PDFError> {
        if let Some(id) = self.font_ids.get(name) {
            return Ok(*id);
        }
        let id = self.doc.add_font(fonts::load(name)?);
        debug!("embedding font `{name}`");
        self.font_ids.insert(name.to_string(), id);
        Ok(id)
    }

    fn spacer(&mut self, height: Pt) {
        if height <= self.remaining() {
            self.cursor -= height;
            self.fresh = false;
        } else if !self.fresh {
            // the spacer is consumed by the page break
            self.finish_page();
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) -> Result<(), PDFError> {
        let id = self.font_id(&paragraph.style.font_name)?;
        let lines = paragraph.wrap(&self.doc.fonts[id], self.frame.width())?;
        for line in lines {
            self.paragraph_line(paragraph, id, &line);
        }
        Ok(())
    }

    fn paragraph_line(&mut self, paragraph: &Paragraph, id: Id<Font>, line: &LineBox) {
        let top = self.reserve(line.height, "paragraph line");
        let x = self.frame.x1
            + paragraph
                .style
                .alignment
                .offset(self.frame.width(), line.width);
        let y = top - line.baseline;
        for fragment in line.fragments.iter() {
            self.page.add_span(SpanLayout {
                text: fragment.text.clone(),
                font: SpanFont {
                    id,
                    size: fragment.size,
                },
                colour: paragraph.style.colour,
                coords: (x + fragment.x, y),
            });
        }
    }

    fn table(&mut self, table: &Table) -> Result<(), PDFError> {
        let resolved = table.resolve()?;
        // tables are centred in the frame
        let x = self.frame.x1 + (self.frame.width() - resolved.width()) / 2.0;
        for row in resolved.rows.iter() {
            let top = self.reserve(row.height, "table row");
            self.table_row(&resolved, row, x, top)?;
        }
        Ok(())
    }

    fn table_row(
        &mut self,
        table: &ResolvedTable,
        row: &ResolvedRow,
        x: Pt,
        top: Pt,
    ) -> Result<(), PDFError> {
        let bottom = top - row.height;

        for cell in row.cells.iter().filter(|cell| !cell.text.is_empty()) {
            let id = self.font_id(&cell.font_name)?;
            let font = &self.doc.fonts[id];
            let cell_x = x + table.col_offset(*cell.cols.start());
            let available = table.cols_width(&cell.cols) - CELL_PADDING_X * 2.0;
            let text_width = width_of_text(&cell.text, font, cell.font_size);
            let baseline = bottom + CELL_PADDING_Y - font.descent(cell.font_size);
            self.page.add_span(SpanLayout {
                text: cell.text.clone(),
                font: SpanFont {
                    id,
                    size: cell.font_size,
                },
                colour: colours::BLACK,
                coords: (
                    cell_x + CELL_PADDING_X + cell.alignment.offset(available, text_width),
                    baseline,
                ),
            });
        }

        let rules = row
            .lines_above
            .iter()
            .map(|rule| (rule, top))
            .chain(row.lines_below.iter().map(|rule| (rule, bottom)));
        for (rule, y) in rules {
            let x1 = x + table.col_offset(*rule.cols.start());
            let x2 = x1 + table.cols_width(&rule.cols);
            self.page.add_line(LineLayout {
                from: (x1, y),
                to: (x2, y),
                width: rule.width,
                colour: rule.colour,
            });
        }

        Ok(())
    }

    fn finish(mut self) -> Document {
        if !self.page.is_empty() || self.doc.page_count() == 0 {
            self.doc.add_page(self.page);
        }
        self.doc
    }
}
