use serde::{Deserialize, Serialize};

/// The customer the proposal is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub address: Option<String>,
    pub url: Option<String>,
    pub business_description: Option<String>,
}

/// The product being sold and the selling company's details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub value_proposition: Option<String>,
    pub url: Option<String>,
    pub company_address: Option<String>,
}

/// One row of the pricing table. Prices stay as written; no arithmetic is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingItem {
    pub label: String,
    pub price: String,
    /// Trailing parenthesised note, e.g. `$0.50 per contact`.
    pub detail: Option<String>,
}

/// Parsed proposal brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brief {
    pub customer: CompanyInfo,
    pub product: ProductInfo,
    pub setup_items: Vec<String>,
    pub pricing: Vec<PricingItem>,
    pub payment_terms: Vec<String>,
    /// Unrecognised labels, in input order.
    pub extras: Vec<(String, String)>,
}
