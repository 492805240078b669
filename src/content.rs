//! Converts laid-out page contents into PDF content stream operators.

use crate::font::Font;
use crate::page::{LineLayout, PageContents, SpanFont, SpanLayout};
use crate::PDFError;
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, PDFError> {
    if contents.is_empty() {
        return Ok(Vec::default());
    }

    let mut content = Content::new();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Line(line) => render_line(&mut content, line),
        }
    }

    Ok(content.finish().to_vec())
}

fn render_text_spans(
    content: &mut Content,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), PDFError> {
    content.save_state();

    let mut current_font: Option<SpanFont> = None;
    let mut current_colour = None;

    for span in spans.iter() {
        let font = fonts
            .get(span.font.id)
            .ok_or_else(|| PDFError::UnknownFont(format!("F{}", span.font.id.index())))?;

        if current_font != Some(span.font) {
            current_font = Some(span.font);
            content.set_font(
                Name(format!("F{}", span.font.id.index()).as_bytes()),
                *span.font.size,
            );
        }
        if current_colour != Some(span.colour) {
            current_colour = Some(span.colour);
            span.colour.set_fill(content);
        }

        content.begin_text();
        content.next_line(*span.coords.0, *span.coords.1);
        content.show(Str(&font.encode(&span.text)));
        content.end_text();
    }

    content.restore_state();
    Ok(())
}

fn render_line(content: &mut Content, line: &LineLayout) {
    content.save_state();
    line.colour.set_stroke(content);
    content.set_line_width(*line.width);
    content.move_to(*line.from.0, *line.from.1);
    content.line_to(*line.to.0, *line.to.1);
    content.stroke();
    content.restore_state();
}
