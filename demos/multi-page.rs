use invoice_gen::InvoiceDocument;
use rust_decimal::Decimal;

fn main() {
    env_logger::init();

    let mut invoice = InvoiceDocument::new("multi-page.pdf").expect("can set up invoice");
    invoice.info.num = "2024-18".to_string();
    for i in 1..=60 {
        invoice.add_item(format!("Ulaznica #{i}"), Decimal::new(1500 + i, 2));
    }

    invoice.populate().expect("can populate invoice");
    invoice.insert_rule();
    invoice.insert_page_break();

    // a second copy for the buyer's records
    invoice.buyer.name = "N.N. (kopija)".to_string();
    invoice.populate().expect("can populate invoice");

    let document = invoice.render_document().expect("can lay out invoice");
    println!("laid out {} pages", document.page_count());
    invoice.create().expect("can write invoice");
}
