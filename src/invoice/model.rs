use crate::PDFError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Format the invoice date is displayed in, e.g. `05.03.2024.`
pub const DATE_FORMAT: &str = "%d.%m.%Y.";

/// Who issues the invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seller {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// OIB, the Croatian personal identification number
    pub taxnum: String,
    pub bankaccount: String,
}

impl Default for Seller {
    fn default() -> Self {
        Seller {
            name: "Savez studenata Fakulteta elektrotehnike i računarstva".to_string(),
            address: "Unska 3, 10000 Zagreb".to_string(),
            phone: "01/6129-758".to_string(),
            email: "info@kset.org".to_string(),
            taxnum: "14504100762".to_string(),
            bankaccount: "2402006-1100582760".to_string(),
        }
    }
}

/// Who the invoice is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buyer {
    pub name: String,
    pub address: String,
    pub taxnum: String,
}

impl Default for Buyer {
    fn default() -> Self {
        Buyer {
            name: "N.N.".to_string(),
            address: String::new(),
            taxnum: String::new(),
        }
    }
}

/// A single billed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub description: String,
    pub amount: Decimal,
}

impl Item {
    pub fn new<S: ToString>(description: S, amount: Decimal) -> Item {
        Item {
            description: description.to_string(),
            amount,
        }
    }

    /// Create an item from a textual amount such as `"25.50"`
    pub fn parse<S: ToString>(description: S, amount: &str) -> Result<Item, PDFError> {
        let parsed = Decimal::from_str(amount.trim())
            .map_err(|_| PDFError::InvalidAmount(amount.to_string()))?;
        Ok(Item::new(description, parsed))
    }
}

/// Invoice number, date, billed items and the closing tax note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceInfo {
    pub num: String,
    /// Display-formatted date, see [DATE_FORMAT]
    pub date: String,
    pub items: Vec<Item>,
    pub taxnote: String,
}

impl Default for InvoiceInfo {
    /// Dated today, with no items
    fn default() -> Self {
        InvoiceInfo {
            num: "YYYY-RB".to_string(),
            date: chrono::Local::now().format(DATE_FORMAT).to_string(),
            items: Vec::new(),
            taxnote: "Porez na dodanu vrijednost nije zaračunat na temelju čl. 22. Zakona o PDV-u."
                .to_string(),
        }
    }
}

/// Everything that goes into an invoice, in one record that can be loaded with serde
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceData {
    pub seller: Seller,
    pub buyer: Buyer,
    pub info: InvoiceInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_amounts_exactly() {
        let item = Item::parse("Widget", " 25.50 ").unwrap();
        assert_eq!(item.amount, Decimal::new(2550, 2));
        assert_eq!(item.description, "Widget");
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        match Item::parse("Widget", "ten") {
            Err(PDFError::InvalidAmount(amount)) => assert_eq!(amount, "ten"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn default_date_is_today() {
        let today = chrono::Local::now().format(DATE_FORMAT).to_string();
        assert_eq!(InvoiceInfo::default().date, today);
        assert_eq!(today.len(), "05.03.2024.".len());
    }

    #[test]
    fn partial_data_falls_back_to_defaults() {
        let data: InvoiceData = serde_json::from_str(
            r#"{
                "buyer": { "name": "ACME" },
                "info": {
                    "num": "2024-7",
                    "items": [
                        { "description": "Widget", "amount": "10.00" },
                        { "description": "Gadget", "amount": 25.5 }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(data.seller, Seller::default());
        assert_eq!(data.buyer.name, "ACME");
        assert_eq!(data.buyer.address, "");
        assert_eq!(data.info.num, "2024-7");
        assert_eq!(data.info.items[0].amount, Decimal::new(1000, 2));
        assert_eq!(data.info.items[1].amount, Decimal::new(255, 1));
        assert!(data.info.taxnote.starts_with("Porez"));
    }
}
