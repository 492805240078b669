mod model;
mod templates;

pub use model::*;
pub use templates::{
    format_amount, item_table_style, StyleSheet, CURRENCY_SUFFIX, ITEM_TABLE_HEADER, TOTAL_LABEL,
};

use crate::document::Document;
use crate::flow::{DocTemplate, FlowBlock, PageGeometry, Paragraph, ParagraphStyle, TableStyle};
use crate::fonts;
use crate::info::Info;
use crate::layout::Margins;
use crate::pagesize;
use crate::units::Cm;
use crate::PDFError;
use log::debug;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where a finished invoice is written
#[derive(Debug)]
pub enum Output<W> {
    /// A file, created (or truncated) when the invoice is written
    Path(PathBuf),
    Writer(W),
}

/// An invoice being assembled.
///
/// The seller, buyer and invoice details are plain public fields that can be changed
/// freely until [InvoiceDocument::populate] turns them into blocks of the flow.
/// Populating appends; calling it twice lays the invoice out twice. Other blocks
/// (rules, page breaks) can be added before or after.
pub struct InvoiceDocument<W: Write = File> {
    pub seller: Seller,
    pub buyer: Buyer,
    pub info: InvoiceInfo,
    template: DocTemplate,
    styles: StyleSheet,
    table_style: TableStyle,
    flow: Vec<FlowBlock>,
    output: Output<W>,
}

impl InvoiceDocument<File> {
    /// Create an invoice that will be written to `path`. The file isn't touched until
    /// [InvoiceDocument::create].
    pub fn new<P: AsRef<Path>>(path: P) -> Result<InvoiceDocument<File>, PDFError> {
        InvoiceDocument::with_output(Output::Path(path.as_ref().to_path_buf()))
    }

    /// Create an invoice from previously loaded data, to be written to `path`
    pub fn from_data<P: AsRef<Path>>(
        path: P,
        data: InvoiceData,
    ) -> Result<InvoiceDocument<File>, PDFError> {
        let mut document = InvoiceDocument::new(path)?;
        document.set_data(data);
        Ok(document)
    }
}

impl<W: Write> InvoiceDocument<W> {
    /// Create an invoice that will be written to `writer`
    pub fn with_writer(writer: W) -> Result<InvoiceDocument<W>, PDFError> {
        InvoiceDocument::with_output(Output::Writer(writer))
    }

    fn with_output(output: Output<W>) -> Result<InvoiceDocument<W>, PDFError> {
        fonts::register_default()?;

        let geometry = PageGeometry {
            size: pagesize::A4,
            margins: Margins::all(Cm(1.0)),
            content_margins: Margins::all(Cm(1.5)),
            ..PageGeometry::default()
        };
        let base = ParagraphStyle::new("Base").with_font(fonts::DEFAULT_FONT);

        Ok(InvoiceDocument {
            seller: Seller::default(),
            buyer: Buyer::default(),
            info: InvoiceInfo::default(),
            template: DocTemplate::new(geometry),
            styles: StyleSheet::from_base(&base),
            table_style: item_table_style(&base.font_name),
            flow: Vec::new(),
            output,
        })
    }

    /// Derive the `Normal`, `NormalCenter` and `NormalRight` styles (and the item
    /// table's font) from `base`. Only affects blocks added afterwards.
    pub fn set_styles(&mut self, base: ParagraphStyle) {
        self.styles = StyleSheet::from_base(&base);
        self.table_style = item_table_style(&base.font_name);
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// The blocks added so far, in layout order
    pub fn flow(&self) -> &[FlowBlock] {
        &self.flow
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.template.geometry
    }

    pub fn set_seller(&mut self, seller: Seller) -> &mut Self {
        self.seller = seller;
        self
    }

    pub fn set_buyer(&mut self, buyer: Buyer) -> &mut Self {
        self.buyer = buyer;
        self
    }

    pub fn set_info(&mut self, info: InvoiceInfo) -> &mut Self {
        self.info = info;
        self
    }

    pub fn set_data(&mut self, data: InvoiceData) -> &mut Self {
        self.seller = data.seller;
        self.buyer = data.buyer;
        self.info = data.info;
        self
    }

    pub fn add_item<S: ToString>(&mut self, description: S, amount: Decimal) -> &mut Self {
        self.info.items.push(Item::new(description, amount));
        self
    }

    /// Sum of the current item amounts
    pub fn total(&self) -> Result<Decimal, PDFError> {
        self.info.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.amount).ok_or(PDFError::AmountOverflow)
        })
    }

    /// Append a horizontal rule with a centimetre of space above and below
    pub fn insert_rule(&mut self) {
        self.flow.push(FlowBlock::spacer(Cm(1.0)));
        self.flow.push(FlowBlock::Table(templates::rule_table(
            &self.styles.normal.font_name,
        )));
        self.flow.push(FlowBlock::spacer(Cm(1.0)));
    }

    pub fn insert_page_break(&mut self) {
        self.flow.push(FlowBlock::PageBreak);
    }

    /// Append the invoice layout for the current seller, buyer and invoice details.
    /// Nothing is appended if the item total overflows.
    pub fn populate(&mut self) -> Result<(), PDFError> {
        let total = self.total()?;
        let styles = &self.styles;

        let blocks: [FlowBlock; 11] = [
            Paragraph::new(templates::seller_paragraph(&self.seller), &styles.normal).into(),
            FlowBlock::spacer(Cm(1.0)),
            Paragraph::new(templates::buyer_paragraph(&self.buyer), &styles.normal_right).into(),
            FlowBlock::spacer(Cm(2.0)),
            Paragraph::new(templates::info_paragraph(&self.info), &styles.normal_center).into(),
            FlowBlock::spacer(Cm(3.0)),
            templates::item_table(&self.info.items, total, self.table_style.clone()).into(),
            FlowBlock::spacer(Cm(1.0)),
            Paragraph::new(templates::taxnote_paragraph(&self.info), &styles.normal_right).into(),
            FlowBlock::spacer(Cm(7.0)),
            Paragraph::new(templates::SIGNATURE, &styles.normal_right).into(),
        ];
        self.flow.extend(blocks);

        debug!(
            "populated invoice {} with {} item(s), total {}",
            self.info.num,
            self.info.items.len(),
            format_amount(total)
        );
        Ok(())
    }

    /// Lay out the flow without writing it anywhere
    pub fn render_document(&self) -> Result<Document, PDFError> {
        let mut info = Info::new();
        info.title(format!("Račun br. {}", self.info.num))
            .author(&self.seller.name);
        self.template.clone().with_info(info).layout(&self.flow)
    }

    /// Lay out the flow and write the PDF. Nothing is written, and no file created,
    /// if layout fails.
    pub fn create(self) -> Result<(), PDFError> {
        let document = self.render_document()?;
        match self.output {
            Output::Path(path) => {
                debug!("writing invoice to {}", path.display());
                let file = File::create(&path)?;
                document.write(BufWriter::new(file))
            }
            Output::Writer(writer) => document.write(writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Alignment, Table};
    use proptest::prelude::*;

    fn invoice() -> InvoiceDocument<Vec<u8>> {
        InvoiceDocument::with_writer(Vec::new()).expect("invoice builds")
    }

    fn tables(flow: &[FlowBlock]) -> Vec<&Table> {
        flow.iter()
            .filter_map(|block| match block {
                FlowBlock::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }

    fn acme() -> InvoiceDocument<Vec<u8>> {
        let mut invoice = invoice();
        invoice.seller = Seller {
            name: "ACME".to_string(),
            address: "Main St 1".to_string(),
            phone: "000".to_string(),
            email: "a@b.c".to_string(),
            taxnum: "123".to_string(),
            bankaccount: "456".to_string(),
        };
        invoice
            .add_item("Widget", Decimal::new(1000, 2))
            .add_item("Gadget", Decimal::new(2550, 2));
        invoice
    }

    #[test]
    fn starts_with_defaults_and_an_empty_flow() {
        let invoice = invoice();
        assert!(invoice.flow().is_empty());
        assert_eq!(invoice.buyer.name, "N.N.");
        assert_eq!(invoice.info.num, "YYYY-RB");
        assert_eq!(invoice.styles().normal_right.alignment, Alignment::Right);
        assert!(fonts::is_registered(fonts::DEFAULT_FONT));
    }

    #[test]
    fn populate_appends_eleven_blocks_in_order() {
        let mut invoice = acme();
        invoice.populate().unwrap();
        let flow = invoice.flow();
        assert_eq!(flow.len(), 11);

        let spacers: Vec<f32> = flow
            .iter()
            .filter_map(|block| match block {
                FlowBlock::Spacer(height) => Some(**height),
                _ => None,
            })
            .collect();
        let cm = |v: f32| *crate::Pt::from(Cm(v));
        assert_eq!(spacers, vec![cm(1.0), cm(2.0), cm(3.0), cm(1.0), cm(7.0)]);

        let styles: Vec<&str> = flow
            .iter()
            .filter_map(|block| match block {
                FlowBlock::Paragraph(p) => Some(p.style.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            styles,
            vec!["Normal", "NormalRight", "NormalCenter", "NormalRight", "NormalRight"]
        );
        assert!(matches!(flow[6], FlowBlock::Table(_)));
    }

    #[test]
    fn acme_scenario() {
        let mut invoice = acme();
        invoice.populate().unwrap();
        let table = tables(invoice.flow())[0];

        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0], vec!["", "Stavka", "Iznos"]);
        assert_eq!(table.rows[1], vec!["1", "Widget", "10.00 kn"]);
        assert_eq!(table.rows[2], vec!["2", "Gadget", "25.50 kn"]);
        assert_eq!(table.rows[3], vec!["Ukupno:", "", "35.50 kn"]);

        match &invoice.flow()[0] {
            FlowBlock::Paragraph(p) => assert!(p.text.starts_with("<font size=13>ACME</font>")),
            other => panic!("expected the seller paragraph, got {other:?}"),
        }
    }

    #[test]
    fn no_items_still_has_header_and_total() {
        let mut invoice = invoice();
        invoice.populate().unwrap();
        let table = tables(invoice.flow())[0];
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Ukupno:", "", "0.00 kn"]);
    }

    #[test]
    fn n_items_make_n_plus_two_rows() {
        let mut invoice = invoice();
        for i in 0..25 {
            invoice.add_item(format!("item {i}"), Decimal::new(i, 1));
        }
        invoice.populate().unwrap();
        let table = tables(invoice.flow())[0];
        assert_eq!(table.rows.len(), 27);
        for (position, row) in table.rows[1..26].iter().enumerate() {
            assert_eq!(row[0], (position + 1).to_string());
        }
        // 0.0 + 0.1 + ... + 2.4
        assert_eq!(table.rows[26][2], "30.00 kn");
    }

    proptest! {
        #[test]
        fn any_items_give_numbered_rows_and_their_sum(
            cents in proptest::collection::vec(0i64..10_000_000, 0..40)
        ) {
            let mut invoice = invoice();
            for (i, c) in cents.iter().enumerate() {
                invoice.add_item(format!("item {i}"), Decimal::new(*c, 2));
            }
            invoice.populate().unwrap();

            let table = tables(invoice.flow())[0];
            prop_assert_eq!(table.rows.len(), cents.len() + 2);
            for (position, row) in table.rows[1..=cents.len()].iter().enumerate() {
                prop_assert_eq!(&row[0], &(position + 1).to_string());
            }

            let sum: i64 = cents.iter().sum();
            let expected = format!("{}.{:02} kn", sum / 100, sum % 100);
            prop_assert_eq!(&table.rows[cents.len() + 1][2], &expected);
            prop_assert_eq!(invoice.total().ok(), Some(Decimal::new(sum, 2)));
        }
    }

    #[test]
    fn populating_twice_repeats_the_layout() {
        let mut invoice = acme();
        invoice.populate().unwrap();
        invoice.populate().unwrap();
        let flow = invoice.flow();
        assert_eq!(flow.len(), 22);
        assert_eq!(flow[..11], flow[11..]);
    }

    #[test]
    fn total_is_taken_at_populate_time() {
        let mut invoice = acme();
        invoice.populate().unwrap();
        invoice.add_item("Late", Decimal::new(1, 0));
        assert_eq!(tables(invoice.flow())[0].rows[3][2], "35.50 kn");
        assert_eq!(invoice.total().unwrap(), Decimal::new(3650, 2));
    }

    #[test]
    fn overflowing_totals_append_nothing() {
        let mut invoice = invoice();
        invoice
            .add_item("a", Decimal::MAX)
            .add_item("b", Decimal::MAX);
        assert!(matches!(invoice.populate(), Err(PDFError::AmountOverflow)));
        assert!(invoice.flow().is_empty());
    }

    #[test]
    fn rules_and_page_breaks() {
        let mut invoice = invoice();
        invoice.insert_rule();
        assert_eq!(invoice.flow().len(), 3);
        invoice.insert_page_break();
        invoice.insert_rule();
        assert_eq!(invoice.flow().len(), 7);
        assert_eq!(invoice.flow()[3], FlowBlock::PageBreak);

        let rule = tables(invoice.flow())[0];
        assert_eq!(rule.rows, vec![vec![String::new()]]);
        assert_eq!(rule.col_widths, vec![crate::Pt::from(Cm(19.0))]);
        assert_eq!(rule.resolve().unwrap().rows[0].lines_below.len(), 1);
    }

    #[test]
    fn data_replaces_all_fields() {
        let mut invoice = invoice();
        let mut data = InvoiceData::default();
        data.buyer.name = "Buyer".to_string();
        data.info.num = "2024-1".to_string();
        invoice.set_data(data.clone());
        assert_eq!(invoice.buyer, data.buyer);
        assert_eq!(invoice.info.num, "2024-1");
    }

    #[test]
    fn create_writes_to_the_writer() {
        let mut invoice = acme();
        invoice.populate().unwrap();
        let document = invoice.render_document().unwrap();
        assert_eq!(document.page_count(), 1);

        let mut bytes = Vec::new();
        document.write(&mut bytes).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn restyling_changes_every_font() {
        let mut invoice = invoice();
        invoice.set_styles(ParagraphStyle::new("Base").with_font("invoice-test-missing"));
        invoice.populate().unwrap();
        assert!(matches!(
            invoice.render_document(),
            Err(PDFError::UnknownFont(name)) if name == "invoice-test-missing"
        ));
    }
}
