//! The fixed Croatian invoice layout: paragraph templates, styles and the item table.
//!
//! Field values are escaped before they are placed in a template, so they always
//! render verbatim.

use super::model::{Buyer, InvoiceInfo, Item, Seller};
use crate::colour::colours;
use crate::flow::markup::escape;
use crate::flow::{Alignment, CellRange, ParagraphStyle, Table, TableCommand, TableStyle};
use crate::units::{Cm, Pt};
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SUFFIX: &str = "kn";
/// Label of the total row, as printed (Croatian for "Total:")
pub const TOTAL_LABEL: &str = "Ukupno:";
/// Index, item and amount column headings, as printed (Croatian)
pub const ITEM_TABLE_HEADER: [&str; 3] = ["", "Stavka", "Iznos"];

pub const SIGNATURE: &str = "Odgovorna osoba &nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;<br /><br /><br /><br /><br />MP &nbsp;&nbsp; ____________________________________ &nbsp;&nbsp;&nbsp;&nbsp;";

/// Format an amount with exactly two decimals and the currency suffix, e.g. `35.50 kn`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // values near the 28 digit limit can't be rescaled to two places, so pad the text
    let text = rounded.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    format!("{whole}.{fraction:0<2} {CURRENCY_SUFFIX}")
}

pub fn seller_paragraph(seller: &Seller) -> String {
    format!(
        "<font size=13>{name}</font> <br />{address} <br />Tel: {phone}, E-mail: {email} <br />OIB: {taxnum} <br />ž.r: {bankaccount}",
        name = escape(&seller.name),
        address = escape(&seller.address),
        phone = escape(&seller.phone),
        email = escape(&seller.email),
        taxnum = escape(&seller.taxnum),
        bankaccount = escape(&seller.bankaccount),
    )
}

pub fn buyer_paragraph(buyer: &Buyer) -> String {
    format!(
        "<font size=13>{name}</font> <br />{address} <br />Šifra: {taxnum}",
        name = escape(&buyer.name),
        address = escape(&buyer.address),
        taxnum = escape(&buyer.taxnum),
    )
}

pub fn info_paragraph(info: &InvoiceInfo) -> String {
    format!(
        "<font size=16>Račun br. {num}</font> <br /><font size=13>Datum: {date}</font>",
        num = escape(&info.num),
        date = escape(&info.date),
    )
}

pub fn taxnote_paragraph(info: &InvoiceInfo) -> String {
    escape(&info.taxnote)
}

/// The paragraph styles used by the invoice, all sharing one font and size
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub normal: ParagraphStyle,
    pub normal_center: ParagraphStyle,
    pub normal_right: ParagraphStyle,
}

impl StyleSheet {
    pub fn from_base(base: &ParagraphStyle) -> StyleSheet {
        StyleSheet {
            normal: base.derive("Normal").with_alignment(Alignment::Left),
            normal_center: base.derive("NormalCenter").with_alignment(Alignment::Center),
            normal_right: base.derive("NormalRight").with_alignment(Alignment::Right),
        }
    }
}

/// Header and total rules, thin rules between items, right-aligned amounts and a
/// total label spanning the index and description columns
pub fn item_table_style(font_name: &str) -> TableStyle {
    TableStyle::new()
        .with(TableCommand::Font {
            range: CellRange::all(),
            name: font_name.to_string(),
            size: None,
        })
        .with(TableCommand::LineAbove {
            range: CellRange::new((0, 1), (-1, 1)),
            width: Pt(1.0),
            colour: colours::BLACK,
        })
        .with(TableCommand::LineAbove {
            range: CellRange::new((0, -1), (-1, -1)),
            width: Pt(1.0),
            colour: colours::BLACK,
        })
        .with(TableCommand::LineAbove {
            range: CellRange::new((0, 2), (-1, -2)),
            width: Pt(0.25),
            colour: colours::BLACK,
        })
        .with(TableCommand::Align {
            range: CellRange::new((0, -1), (0, -1)),
            alignment: Alignment::Right,
        })
        .with(TableCommand::Align {
            range: CellRange::new((-1, 0), (-1, -1)),
            alignment: Alignment::Right,
        })
        .with(TableCommand::Span {
            range: CellRange::new((0, -1), (-2, -1)),
        })
}

/// Header, one numbered row per item and the total row
pub fn item_table(items: &[Item], total: Decimal, style: TableStyle) -> Table {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(items.len() + 2);
    rows.push(ITEM_TABLE_HEADER.iter().map(|h| h.to_string()).collect());
    rows.extend(items.iter().enumerate().map(|(i, item)| {
        vec![
            (i + 1).to_string(),
            item.description.clone(),
            format_amount(item.amount),
        ]
    }));
    rows.push(vec![
        TOTAL_LABEL.to_string(),
        String::new(),
        format_amount(total),
    ]);

    Table::new(rows, vec![Cm(1.0), Cm(14.0), Cm(3.0)]).with_style(style)
}

/// A single empty cell with a rule along its bottom edge
pub fn rule_table(font_name: &str) -> Table {
    Table::new(vec![vec![String::new()]], vec![Cm(19.0)]).with_style(
        TableStyle::new()
            .with(TableCommand::Font {
                range: CellRange::all(),
                name: font_name.to_string(),
                size: None,
            })
            .with(TableCommand::LineBelow {
                range: CellRange::new((0, 0), (0, 0)),
                width: Pt(1.0),
                colour: colours::BLACK,
            }),
    )
}
