use invoice_gen::flow::FlowBlock;
use invoice_gen::{fonts, InvoiceData, InvoiceDocument, Item, PDFError, Seller};
use rust_decimal::Decimal;
use std::io::Write;

fn item_table(invoice: &InvoiceDocument<impl Write>) -> &invoice_gen::flow::Table {
    invoice
        .flow()
        .iter()
        .find_map(|block| match block {
            FlowBlock::Table(table) => Some(table),
            _ => None,
        })
        .expect("populated invoice has an item table")
}

#[test]
fn writes_a_pdf_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("invoice.pdf");

    let mut invoice = InvoiceDocument::new(&path).unwrap();
    invoice.seller = Seller {
        name: "ACME".to_string(),
        address: "Main St 1".to_string(),
        phone: "000".to_string(),
        email: "a@b.c".to_string(),
        taxnum: "123".to_string(),
        bankaccount: "456".to_string(),
    };
    invoice.info.items = vec![
        Item::parse("Widget", "10.00").unwrap(),
        Item::parse("Gadget", "25.50").unwrap(),
    ];
    invoice.populate().unwrap();

    let table = item_table(&invoice);
    assert_eq!(table.rows[1], vec!["1", "Widget", "10.00 kn"]);
    assert_eq!(table.rows[2], vec!["2", "Gadget", "25.50 kn"]);
    assert_eq!(table.rows[3][2], "35.50 kn");

    // nothing is written before create
    assert!(!path.exists());
    invoice.create().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.len() > 1000);
}

#[test]
fn writes_to_any_writer() {
    let mut bytes: Vec<u8> = Vec::new();
    let mut invoice = InvoiceDocument::with_writer(&mut bytes).unwrap();
    invoice.populate().unwrap();
    assert_eq!(item_table(&invoice).rows.len(), 2);
    invoice.create().unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn unwritable_paths_fail_at_create() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("invoice.pdf");

    let mut invoice = InvoiceDocument::new(&path).expect("construction doesn't open the file");
    invoice.populate().unwrap();
    assert!(matches!(invoice.create(), Err(PDFError::Io(_))));
}

#[test]
fn many_documents_share_the_font_registry() {
    let first = InvoiceDocument::with_writer(Vec::new());
    let second = InvoiceDocument::with_writer(Vec::new());
    assert!(first.is_ok());
    assert!(second.is_ok());
    fonts::register_default().expect("registering again is a no-op");
}

#[test]
fn long_invoices_span_pages() {
    let mut invoice = InvoiceDocument::with_writer(Vec::new()).unwrap();
    for i in 0..60 {
        invoice.add_item(lipsum::lipsum_words(4), Decimal::new(100 + i, 2));
    }
    invoice.populate().unwrap();
    invoice.insert_rule();
    invoice.insert_page_break();
    invoice.populate().unwrap();
    assert_eq!(invoice.flow().len(), 11 + 3 + 1 + 11);

    let document = invoice.render_document().unwrap();
    assert!(document.page_count() >= 4);
    let first_page_text: Vec<String> = document
        .page(0)
        .unwrap()
        .spans()
        .map(|span| span.text.clone())
        .collect();
    assert!(first_page_text.iter().any(|t| t == "Stavka"));
    invoice.create().unwrap();
}

#[test]
fn page_breaks_separate_copies() {
    let mut invoice = InvoiceDocument::with_writer(Vec::new()).unwrap();
    invoice.populate().unwrap();
    invoice.insert_page_break();
    invoice.populate().unwrap();

    let document = invoice.render_document().unwrap();
    assert_eq!(document.page_count(), 2);
    for page in document.pages() {
        let totals = page.spans().filter(|span| span.text == "Ukupno:").count();
        assert_eq!(totals, 1);
    }
}

#[test]
fn invoices_load_from_json() {
    let data: InvoiceData = serde_json::from_str(
        r#"{
            "buyer": { "name": "ACME", "taxnum": "99" },
            "info": {
                "num": "2024-3",
                "date": "01.02.2024.",
                "items": [{ "description": "Widget", "amount": "1.5" }]
            }
        }"#,
    )
    .unwrap();

    let dir = tempfile::tempdir().expect("temp dir");
    let mut invoice = InvoiceDocument::from_data(dir.path().join("data.pdf"), data).unwrap();
    invoice.populate().unwrap();
    assert_eq!(item_table(&invoice).rows[1][2], "1.50 kn");

    match &invoice.flow()[4] {
        FlowBlock::Paragraph(p) => assert!(p.text.contains("Datum: 01.02.2024.")),
        other => panic!("expected the info paragraph, got {other:?}"),
    }
}
