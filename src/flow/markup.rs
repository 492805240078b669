//! The small inline markup language understood by paragraphs.
//!
//! * `<font size=N>…</font>` changes the font size, and may be nested
//! * `<br />` (or `<br/>`, `<br>`) forces a line break
//! * `&nbsp;`, `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;` and numeric `&#NN;` /
//!   `&#xHH;` character references
//!
//! Anything else between angle brackets is rejected.

use crate::units::Pt;
use crate::PDFError;

pub const NBSP: char = '\u{a0}';

/// Text set at a single size
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub size: Pt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(Run),
    Break,
}

/// Escape text so that it is reproduced verbatim when used inside markup
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Parse `markup` into runs of text and line breaks. Runs start at `base_size`.
pub fn parse(markup: &str, base_size: Pt) -> Result<Vec<Token>, PDFError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut sizes: Vec<Pt> = vec![base_size];
    let mut text = String::new();

    let flush = |text: &mut String, tokens: &mut Vec<Token>, size: Pt| {
        if !text.is_empty() {
            tokens.push(Token::Text(Run {
                text: std::mem::take(text),
                size,
            }));
        }
    };

    let mut chars = markup.char_indices();
    while let Some((i, ch)) = chars.next() {
        let size = *sizes.last().unwrap_or(&base_size);
        match ch {
            '<' => {
                let rest = &markup[i + 1..];
                let end = rest
                    .find('>')
                    .ok_or_else(|| PDFError::Markup(format!("unterminated tag at byte {i}")))?;
                let tag = rest[..end].trim();
                // skip over the tag body and closing bracket
                for _ in rest[..=end].chars() {
                    chars.next();
                }

                flush(&mut text, &mut tokens, size);
                match parse_tag(tag)? {
                    Tag::Break => tokens.push(Token::Break),
                    Tag::FontOpen(new_size) => sizes.push(new_size.unwrap_or(size)),
                    Tag::FontClose => {
                        if sizes.len() <= 1 {
                            return Err(PDFError::Markup("unbalanced </font>".to_string()));
                        }
                        sizes.pop();
                    }
                }
            }
            '&' => {
                let rest = &markup[i + 1..];
                let end = rest
                    .find(';')
                    .filter(|&end| end <= 10)
                    .ok_or_else(|| PDFError::Markup(format!("unterminated entity at byte {i}")))?;
                let entity = &rest[..end];
                for _ in rest[..=end].chars() {
                    chars.next();
                }
                text.push(parse_entity(entity)?);
            }
            _ => text.push(ch),
        }
    }

    if sizes.len() > 1 {
        return Err(PDFError::Markup("unclosed <font>".to_string()));
    }
    flush(&mut text, &mut tokens, base_size);

    Ok(tokens)
}

enum Tag {
    Break,
    FontOpen(Option<Pt>),
    FontClose,
}

fn parse_tag(tag: &str) -> Result<Tag, PDFError> {
    let tag = tag.trim_end_matches('/').trim();
    let mut parts = tag.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();

    match name.as_str() {
        "br" => Ok(Tag::Break),
        "/font" => Ok(Tag::FontClose),
        "font" => {
            let mut size = None;
            for attribute in parts {
                let (key, value) = attribute.split_once('=').ok_or_else(|| {
                    PDFError::Markup(format!("malformed attribute `{attribute}`"))
                })?;
                let value = value.trim_matches(|c| c == '"' || c == '\'');
                match key.to_ascii_lowercase().as_str() {
                    "size" => {
                        let parsed: f32 = value.parse().map_err(|_| {
                            PDFError::Markup(format!("invalid font size `{value}`"))
                        })?;
                        size = Some(Pt(parsed));
                    }
                    // the font face and colour are fixed by the paragraph style
                    "name" | "face" | "color" => {}
                    _ => {
                        return Err(PDFError::Markup(format!(
                            "unsupported font attribute `{key}`"
                        )))
                    }
                }
            }
            Ok(Tag::FontOpen(size))
        }
        _ => Err(PDFError::Markup(format!("unsupported tag <{tag}>"))),
    }
}

fn parse_entity(entity: &str) -> Result<char, PDFError> {
    let unknown = || PDFError::Markup(format!("unknown entity &{entity};"));
    match entity {
        "nbsp" => Ok(NBSP),
        "amp" => Ok('&'),
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).map_err(|_| unknown())?
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().map_err(|_| unknown())?
            } else {
                return Err(unknown());
            };
            char::from_u32(code).ok_or_else(unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, size: f32) -> Token {
        Token::Text(Run {
            text: text.to_string(),
            size: Pt(size),
        })
    }

    #[test]
    fn parses_font_sizes_and_breaks() {
        let tokens = parse("<font size=13>ACME</font> <br />Main St 1", Pt(10.0)).unwrap();
        assert_eq!(
            tokens,
            vec![run("ACME", 13.0), run(" ", 10.0), Token::Break, run("Main St 1", 10.0)]
        );
    }

    #[test]
    fn nested_fonts_restore_outer_size() {
        let tokens = parse(
            "<font size=16>a<font size='20'>b</font>c</font>d",
            Pt(10.0),
        )
        .unwrap();
        assert_eq!(
            tokens,
            vec![run("a", 16.0), run("b", 20.0), run("c", 16.0), run("d", 10.0)]
        );
    }

    #[test]
    fn decodes_entities() {
        let tokens = parse("A&nbsp;&amp;&#65;&#x42;&lt;", Pt(10.0)).unwrap();
        assert_eq!(tokens, vec![run("A\u{a0}&AB<", 10.0)]);
    }

    #[test]
    fn break_variants() {
        let tokens = parse("<br><br/><BR />", Pt(10.0)).unwrap();
        assert_eq!(tokens, vec![Token::Break, Token::Break, Token::Break]);
    }

    #[test]
    fn rejects_bad_markup() {
        for bad in [
            "<b>bold</b>",
            "<font size=13>open",
            "close</font>",
            "&bogus;",
            "a & b",
            "<br",
            "<font size=big>x</font>",
        ] {
            assert!(
                matches!(parse(bad, Pt(10.0)), Err(PDFError::Markup(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn escaped_text_round_trips() {
        let original = "Smith & Sons <d.o.o.>";
        let tokens = parse(&escape(original), Pt(10.0)).unwrap();
        assert_eq!(tokens, vec![run(original, 10.0)]);
    }

    #[test]
    fn multibyte_text_survives_tags() {
        let tokens = parse("ž.r: 1<br />Šifra", Pt(10.0)).unwrap();
        assert_eq!(tokens, vec![run("ž.r: 1", 10.0), Token::Break, run("Šifra", 10.0)]);
    }
}
