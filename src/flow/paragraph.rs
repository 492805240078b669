use super::markup::{self, Token, NBSP};
use super::style::ParagraphStyle;
use crate::font::Font;
use crate::layout::width_of_text;
use crate::units::Pt;
use crate::PDFError;

/// A block of styled, wrapped text
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// The paragraph text, which may contain markup (see [super::markup])
    pub text: String,
    pub style: ParagraphStyle,
}

/// A piece of a laid out line, drawn at a single size
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub size: Pt,
    /// Offset of the fragment from the start of the line
    pub x: Pt,
}

/// One line of a laid out paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub fragments: Vec<Fragment>,
    pub width: Pt,
    pub height: Pt,
    /// Distance from the top of the line box down to the baseline
    pub baseline: Pt,
}

impl LineBox {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Default)]
struct Word {
    pieces: Vec<(String, Pt)>,
}

impl Word {
    fn push(&mut self, ch: char, size: Pt) {
        match self.pieces.last_mut() {
            Some((text, piece_size)) if *piece_size == size => text.push(ch),
            _ => self.pieces.push((ch.to_string(), size)),
        }
    }

    fn width(&self, font: &Font) -> Pt {
        self.pieces
            .iter()
            .map(|(text, size)| width_of_text(text, font, *size))
            .sum()
    }

    fn last_size(&self) -> Option<Pt> {
        self.pieces.last().map(|(_, size)| *size)
    }
}

/// A hard line (between explicit breaks) split into words. Ordinary whitespace
/// separates words and collapses; non-breaking spaces are part of words.
fn split_words(tokens: &[Token]) -> Vec<Vec<Word>> {
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut line: Vec<Word> = Vec::new();
    let mut word = Word::default();

    for token in tokens {
        match token {
            Token::Break => {
                if !word.pieces.is_empty() {
                    line.push(std::mem::take(&mut word));
                }
                lines.push(std::mem::take(&mut line));
            }
            Token::Text(run) => {
                for ch in run.text.chars() {
                    if ch.is_whitespace() && ch != NBSP {
                        if !word.pieces.is_empty() {
                            line.push(std::mem::take(&mut word));
                        }
                    } else {
                        word.push(ch, run.size);
                    }
                }
            }
        }
    }
    if !word.pieces.is_empty() {
        line.push(word);
    }
    lines.push(line);

    lines
}

impl Paragraph {
    pub fn new<S: ToString>(text: S, style: &ParagraphStyle) -> Paragraph {
        Paragraph {
            text: text.to_string(),
            style: style.clone(),
        }
    }

    /// Wrap the paragraph into lines no wider than `max_width` (words wider than that
    /// get a line to themselves and overflow)
    pub fn wrap(&self, font: &Font, max_width: Pt) -> Result<Vec<LineBox>, PDFError> {
        let tokens = markup::parse(&self.text, self.style.font_size)?;
        let mut boxes: Vec<LineBox> = Vec::new();

        for words in split_words(&tokens) {
            if words.is_empty() {
                boxes.push(self.line_box(Vec::new(), Pt(0.0)));
                continue;
            }

            let mut line: Vec<Fragment> = Vec::new();
            let mut x = Pt(0.0);
            let mut previous_size: Option<Pt> = None;

            for word in words {
                let word_width = word.width(font);
                let space = previous_size
                    .map(|size| width_of_text(" ", font, size))
                    .unwrap_or_default();

                if !line.is_empty() && x + space + word_width > max_width {
                    boxes.push(self.line_box(std::mem::take(&mut line), x));
                    x = Pt(0.0);
                } else if !line.is_empty() {
                    if let Some(last) = line.last_mut() {
                        last.text.push(' ');
                    }
                    x += space;
                }

                previous_size = word.last_size();
                for (text, size) in word.pieces {
                    let width = width_of_text(&text, font, size);
                    match line.last_mut() {
                        Some(last) if last.size == size => last.text.push_str(&text),
                        _ => line.push(Fragment { text, size, x }),
                    }
                    x += width;
                }
            }

            boxes.push(self.line_box(line, x));
        }

        Ok(boxes)
    }

    fn line_box(&self, fragments: Vec<Fragment>, width: Pt) -> LineBox {
        let largest = fragments
            .iter()
            .map(|f| f.size)
            .fold(self.style.font_size, Pt::max);
        let height = self.style.leading.max(largest * 1.2);
        LineBox {
            fragments,
            width,
            height,
            baseline: height - largest * 0.2,
        }
    }
}
