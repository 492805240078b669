use invoice_gen::{Buyer, InvoiceDocument, Item};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut invoice = InvoiceDocument::new("invoice.pdf").expect("can set up invoice");
    invoice.set_buyer(Buyer {
        name: "ACME d.o.o.".to_string(),
        address: "Ilica 1, 10000 Zagreb".to_string(),
        taxnum: "12345678901".to_string(),
    });
    invoice.info.num = "2024-17".to_string();
    invoice.info.items = vec![
        Item::parse("Članarina za 2024. godinu", "120.00").expect("valid amount"),
        Item::parse("Najam dvorane", "350.50").expect("valid amount"),
    ];

    invoice.populate().expect("can populate invoice");
    invoice.create().expect("can write invoice");
}
