use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};

/// Which font, at what size, a span of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text placed on the page, with `coords` being the left end of
/// its baseline
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A straight stroked line, used for table rules
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub width: Pt,
    pub colour: Colour,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Line(LineLayout),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Where meaningful content is intended to be, written as the page's `ArtBox`.
    /// Defaults to the content box.
    pub art_box: Option<Rect>,
    /// The laid out contents, drawn in order
    pub contents: Vec<PageContents>,
}

fn inset(media_box: &Rect, margins: &Margins) -> Rect {
    Rect {
        x1: media_box.x1 + margins.left,
        y1: media_box.y1 + margins.bottom,
        x2: media_box.x2 - margins.right,
        y2: media_box.y2 - margins.top,
    }
}

impl Page {
    /// Create a new page of the given size. The content box is the page inset by the
    /// margins, or the whole page if there are none.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let media_box = Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: size.0,
            y2: size.1,
        };
        let content_box = match margins {
            Some(margins) => inset(&media_box, &margins),
            None => media_box,
        };

        Page {
            media_box,
            content_box,
            art_box: None,
            contents: Vec::default(),
        }
    }

    /// Set the page's `ArtBox` to the page inset by `margins`
    pub fn set_art_margins(&mut self, margins: &Margins) {
        self.art_box = Some(inset(&self.media_box, margins));
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        // consecutive spans are grouped so the renderer can skip redundant font changes
        if let Some(PageContents::Text(spans)) = self.contents.last_mut() {
            spans.push(span);
        } else {
            self.contents.push(PageContents::Text(vec![span]));
        }
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    /// All text spans on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans),
                _ => None,
            })
            .flatten()
    }

    /// All stroked lines on the page, in drawing order
    pub fn lines(&self) -> impl Iterator<Item = &LineLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get(RefType::Page(page_index)).ok_or(PDFError::PageMissing)?;
        let page_tree_id = refs.get(RefType::PageTree).ok_or(PDFError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.art_box.unwrap_or(self.content_box).into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed =
            compress_to_vec_zlib(rendered.as_slice(), CompressionLevel::DefaultCompression as u8);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}
