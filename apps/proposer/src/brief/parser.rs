//! Brief Parser: turns a `LABEL: value` text brief into a [`Brief`].
//!
//! Labels are matched case-insensitively. `ADDRESS` and `URL` attach to whichever
//! party (customer or product) was introduced last. `- item` lines belong to the
//! list opened by the most recent `SETUP FEE`, `PRICING`/`USAGE FEE...` or
//! `PAYMENT TERMS` line.

use std::path::Path;

use tracing::{debug, info};

use crate::brief::models::{Brief, CompanyInfo, PricingItem, ProductInfo};
use crate::errors::ProposalError;

/// Label of the pricing row created from a `SETUP FEE:` line.
pub const SETUP_FEE_LABEL: &str = "Setup Fee";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Party {
    Customer,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListContext {
    None,
    Setup,
    Pricing,
    Payment,
}

/// Reads and parses the brief at `path`. An unreadable file is a malformed brief
/// reported against line 0 with the path in the reason.
pub fn load_brief(path: &Path) -> Result<Brief, ProposalError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ProposalError::malformed(0, format!("cannot read brief at {}: {e}", path.display()))
    })?;
    let brief = parse_brief(&text)?;
    info!(
        "Loaded brief for customer '{}' ({} pricing items)",
        brief.customer.name,
        brief.pricing.len()
    );
    Ok(brief)
}

/// Parses brief text. Fails fast on the first malformed line or missing required field.
pub fn parse_brief(text: &str) -> Result<Brief, ProposalError> {
    // Editors on Windows save UTF-8 with a byte order mark.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut customer = CompanyInfo::default();
    let mut product = ProductInfo::default();
    let mut customer_line: Option<usize> = None;
    let mut product_line: Option<usize> = None;
    let mut setup_items = Vec::new();
    let mut pricing = Vec::new();
    let mut payment_terms = Vec::new();
    let mut extras = Vec::new();

    let mut party: Option<Party> = None;
    let mut list = ListContext::None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(item) = line.strip_prefix('-') {
            let item = item.trim();
            if item.is_empty() {
                return Err(ProposalError::malformed(line_no, "empty list item"));
            }
            match list {
                ListContext::Setup => {
                    debug!("Setup item: {item}");
                    setup_items.push(item.to_string());
                }
                ListContext::Payment => {
                    debug!("Payment term: {item}");
                    payment_terms.push(item.to_string());
                }
                ListContext::Pricing => {
                    let priced = parse_pricing_item(item)
                        .ok_or_else(|| {
                            ProposalError::malformed(
                                line_no,
                                format!("pricing item '{item}' must look like 'LABEL: price'"),
                            )
                        })?;
                    debug!("Pricing item: {} = {}", priced.label, priced.price);
                    pricing.push(priced);
                }
                ListContext::None => {
                    return Err(ProposalError::malformed(
                        line_no,
                        format!("list item '{item}' appears outside of a SETUP FEE, PRICING or PAYMENT TERMS block"),
                    ));
                }
            }
            continue;
        }

        if line.to_ascii_uppercase().starts_with("USAGE FEE") {
            debug!("Entering pricing block: {line}");
            if let Some(item) = parse_pricing_item(line) {
                pricing.push(item);
            }
            list = ListContext::Pricing;
            continue;
        }

        let (label, value) = split_label(line).ok_or_else(|| {
            ProposalError::malformed(line_no, format!("expected 'LABEL: value', got '{line}'"))
        })?;

        match label.to_ascii_uppercase().as_str() {
            "CUSTOMER" => {
                reject_duplicate("CUSTOMER", customer_line, line_no)?;
                customer_line = Some(line_no);
                customer.name = value.to_string();
                party = Some(Party::Customer);
                list = ListContext::None;
            }
            "PRODUCT BEING SOLD" | "PRODUCT" => {
                reject_duplicate("PRODUCT", product_line, line_no)?;
                product_line = Some(line_no);
                product.name = value.to_string();
                party = Some(Party::Product);
                list = ListContext::None;
            }
            "ADDRESS" => match party {
                Some(Party::Customer) => customer.address = non_empty(value),
                Some(Party::Product) => product.company_address = non_empty(value),
                None => extras.push((label.to_string(), value.to_string())),
            },
            "URL" => match party {
                Some(Party::Customer) => customer.url = non_empty(value),
                Some(Party::Product) => product.url = non_empty(value),
                None => extras.push((label.to_string(), value.to_string())),
            },
            "BUSINESS OF CUSTOMER" => customer.business_description = non_empty(value),
            "VALUE PROPOSITION" => product.value_proposition = non_empty(value),
            "SETUP FEE" => {
                if value.is_empty() {
                    return Err(ProposalError::malformed(line_no, "SETUP FEE has no amount"));
                }
                pricing.push(PricingItem {
                    label: SETUP_FEE_LABEL.to_string(),
                    price: value.to_string(),
                    detail: None,
                });
                list = ListContext::Setup;
            }
            "PRICING" => {
                if !value.is_empty() {
                    let item = parse_pricing_item(line).ok_or_else(|| {
                        ProposalError::malformed(line_no, format!("cannot read price '{value}'"))
                    })?;
                    pricing.push(item);
                }
                list = ListContext::Pricing;
            }
            "PAYMENT TERMS" => {
                if !value.is_empty() {
                    payment_terms.push(value.to_string());
                }
                list = ListContext::Payment;
            }
            _ => {
                debug!("Unrecognised label '{label}' kept verbatim");
                extras.push((label.to_string(), value.to_string()));
            }
        }
    }

    if customer.name.is_empty() {
        return Err(ProposalError::malformed(0, "missing required field 'CUSTOMER'"));
    }
    if product.name.is_empty() {
        return Err(ProposalError::malformed(
            0,
            "missing required field 'PRODUCT BEING SOLD'",
        ));
    }
    if pricing.is_empty() {
        return Err(ProposalError::malformed(
            0,
            "brief has no pricing items (expected SETUP FEE or a PRICING list)",
        ));
    }

    Ok(Brief {
        customer,
        product,
        setup_items,
        pricing,
        payment_terms,
        extras,
    })
}

/// Splits `LABEL: value` at the first colon. The label must be non-empty.
fn split_label(line: &str) -> Option<(&str, &str)> {
    let (label, value) = line.split_once(':')?;
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some((label, value.trim()))
}

/// Parses `LABEL: price (detail)`; the parenthesised detail is optional.
fn parse_pricing_item(item: &str) -> Option<PricingItem> {
    let (label, rest) = split_label(item)?;
    if rest.is_empty() {
        return None;
    }

    let (price, detail) = match (rest.find('('), rest.ends_with(')')) {
        (Some(open), true) if open > 0 => (
            rest[..open].trim(),
            non_empty(rest[open + 1..rest.len() - 1].trim()),
        ),
        _ => (rest, None),
    };

    if price.is_empty() {
        return None;
    }

    Some(PricingItem {
        label: label.to_string(),
        price: price.to_string(),
        detail,
    })
}

fn reject_duplicate(label: &str, first: Option<usize>, line: usize) -> Result<(), ProposalError> {
    match first {
        Some(first) => Err(ProposalError::malformed(
            line,
            format!("duplicate {label} field (first given on line {first})"),
        )),
        None => Ok(()),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BRIEF: &str = r#"
Customer: Lumen Analytics
ADDRESS: 500 Market St, San Francisco, CA
URL: https://lumen.example.com
BUSINESS OF CUSTOMER: B2B analytics for retail chains

PRODUCT BEING SOLD: ReachGenie
VALUE PROPOSITION: Personalised outbound campaigns at scale
URL: https://reachgenie.example.com
ADDRESS: 1 Main St, Austin, TX

SETUP FEE: $2,500
- CRM integration
- Voice cloning for two languages

USAGE FEE FOR A CAMPAIGN (PER LANGUAGE):
- FOR UP TO 1,000 CONTACTS: $500 ($0.50 per contact)
- FOR UP TO 10,000 CONTACTS: $4,000 ($0.40 per contact)

PAYMENT TERMS:
- 50% upfront
- Remainder net 30
ACCOUNT MANAGER: Dana Ruiz
"#;

    const MINIMAL_BRIEF: &str = "CUSTOMER: Acme Corp\nPRODUCT: Widget Pro\nSETUP FEE: $500\nPAYMENT TERMS: Net 30\n";

    #[test]
    fn test_full_brief_parses_all_sections() {
        let brief = parse_brief(FULL_BRIEF).unwrap();

        assert_eq!(brief.customer.name, "Lumen Analytics");
        assert_eq!(
            brief.customer.address.as_deref(),
            Some("500 Market St, San Francisco, CA")
        );
        assert_eq!(brief.customer.url.as_deref(), Some("https://lumen.example.com"));
        assert_eq!(
            brief.customer.business_description.as_deref(),
            Some("B2B analytics for retail chains")
        );

        assert_eq!(brief.product.name, "ReachGenie");
        assert_eq!(brief.product.url.as_deref(), Some("https://reachgenie.example.com"));
        assert_eq!(brief.product.company_address.as_deref(), Some("1 Main St, Austin, TX"));

        assert_eq!(
            brief.setup_items,
            vec!["CRM integration", "Voice cloning for two languages"]
        );
        assert_eq!(brief.payment_terms, vec!["50% upfront", "Remainder net 30"]);
        assert_eq!(
            brief.extras,
            vec![("ACCOUNT MANAGER".to_string(), "Dana Ruiz".to_string())]
        );
    }

    #[test]
    fn test_pricing_items_preserve_input_order_and_detail() {
        let brief = parse_brief(FULL_BRIEF).unwrap();
        let labels: Vec<&str> = brief.pricing.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Setup Fee",
                "FOR UP TO 1,000 CONTACTS",
                "FOR UP TO 10,000 CONTACTS"
            ]
        );
        assert_eq!(brief.pricing[0].price, "$2,500");
        assert_eq!(brief.pricing[1].price, "$500");
        assert_eq!(brief.pricing[1].detail.as_deref(), Some("$0.50 per contact"));
        assert_eq!(brief.pricing[2].price, "$4,000");
    }

    #[test]
    fn test_minimal_brief_fields_unmodified() {
        let brief = parse_brief(MINIMAL_BRIEF).unwrap();
        assert_eq!(brief.customer.name, "Acme Corp");
        assert_eq!(brief.product.name, "Widget Pro");
        assert_eq!(
            brief.pricing,
            vec![PricingItem {
                label: "Setup Fee".to_string(),
                price: "$500".to_string(),
                detail: None,
            }]
        );
        assert_eq!(brief.payment_terms, vec!["Net 30"]);
        assert!(brief.extras.is_empty());
    }

    #[test]
    fn test_missing_customer_fails() {
        let err = parse_brief("PRODUCT: Widget Pro\nSETUP FEE: $500\n").unwrap_err();
        assert!(
            matches!(err, ProposalError::MalformedBrief { line: 0, ref reason } if reason.contains("CUSTOMER"))
        );
    }

    #[test]
    fn test_missing_product_fails() {
        let err = parse_brief("CUSTOMER: Acme Corp\nSETUP FEE: $500\n").unwrap_err();
        assert!(
            matches!(err, ProposalError::MalformedBrief { ref reason, .. } if reason.contains("PRODUCT"))
        );
    }

    #[test]
    fn test_missing_pricing_fails() {
        let err = parse_brief("CUSTOMER: Acme Corp\nPRODUCT: Widget Pro\nPAYMENT TERMS: Net 30\n")
            .unwrap_err();
        assert!(
            matches!(err, ProposalError::MalformedBrief { ref reason, .. } if reason.contains("pricing"))
        );
    }

    #[test]
    fn test_blank_required_value_counts_as_missing() {
        let err = parse_brief("CUSTOMER:\nPRODUCT: Widget Pro\nSETUP FEE: $500\n").unwrap_err();
        assert!(matches!(err, ProposalError::MalformedBrief { line: 0, .. }));
    }

    #[test]
    fn test_unlabelled_line_reports_line_number() {
        let err = parse_brief("CUSTOMER: Acme Corp\nthis line has no label\n").unwrap_err();
        assert!(matches!(err, ProposalError::MalformedBrief { line: 2, .. }));
    }

    #[test]
    fn test_bullet_outside_list_fails() {
        let err = parse_brief("CUSTOMER: Acme Corp\n- stray item\n").unwrap_err();
        assert!(matches!(err, ProposalError::MalformedBrief { line: 2, .. }));
    }

    #[test]
    fn test_pricing_bullet_without_price_fails() {
        let err = parse_brief("CUSTOMER: Acme Corp\nPRICING:\n- Premium tier\n").unwrap_err();
        assert!(
            matches!(err, ProposalError::MalformedBrief { line: 3, ref reason } if reason.contains("Premium tier"))
        );
    }

    #[test]
    fn test_setup_fee_without_amount_fails() {
        let err = parse_brief("CUSTOMER: Acme Corp\nSETUP FEE:\n").unwrap_err();
        assert!(matches!(err, ProposalError::MalformedBrief { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_customer_fails() {
        let err = parse_brief("CUSTOMER: Acme\nCUSTOMER: Other\n").unwrap_err();
        assert!(
            matches!(err, ProposalError::MalformedBrief { line: 2, ref reason } if reason.contains("line 1"))
        );
    }

    #[test]
    fn test_pricing_item_with_parenthesis_mid_text_keeps_price_whole() {
        let item = parse_pricing_item("Support (optional): $100 per month").unwrap();
        assert_eq!(item.label, "Support (optional)");
        assert_eq!(item.price, "$100 per month");
        assert!(item.detail.is_none());
    }

    #[test]
    fn test_usage_fee_header_with_amount_becomes_pricing_row() {
        let brief = parse_brief(
            "CUSTOMER: Acme Corp\nPRODUCT: Widget Pro\nSETUP FEE: $500\nUSAGE FEE: $100 per campaign\n",
        )
        .unwrap();

        assert_eq!(brief.pricing.len(), 2);
        assert_eq!(brief.pricing[1].label, "USAGE FEE");
        assert_eq!(brief.pricing[1].price, "$100 per campaign");
    }

    #[test]
    fn test_usage_fee_header_without_amount_only_opens_list() {
        let brief = parse_brief(FULL_BRIEF).unwrap();
        assert!(brief
            .pricing
            .iter()
            .all(|p| !p.label.to_ascii_uppercase().starts_with("USAGE FEE")));
    }

    #[test]
    fn test_pricing_header_with_amount_counts_as_pricing() {
        let brief = parse_brief("CUSTOMER: Acme Corp\nPRODUCT: Widget Pro\nPRICING: $500 (flat)\n- Extra seat: $20\n")
            .unwrap();

        assert_eq!(
            brief.pricing,
            vec![
                PricingItem {
                    label: "PRICING".to_string(),
                    price: "$500".to_string(),
                    detail: Some("flat".to_string()),
                },
                PricingItem {
                    label: "Extra seat".to_string(),
                    price: "$20".to_string(),
                    detail: None,
                },
            ]
        );
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let brief =
            parse_brief("\u{feff}CUSTOMER: Acme Corp\nPRODUCT: Widget Pro\nSETUP FEE: $500\n")
                .unwrap();
        assert_eq!(brief.customer.name, "Acme Corp");
        assert!(brief.extras.is_empty());
    }

    #[test]
    fn test_load_brief_missing_file_is_malformed_brief_naming_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_brief(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(
            err,
            ProposalError::MalformedBrief { line: 0, ref reason } if reason.contains("absent.txt")
        ));
    }
}
