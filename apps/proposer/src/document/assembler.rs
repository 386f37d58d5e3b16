//! Document Assembler: maps a brief, its generated content and a date to the
//! ordered block sequence the renderer consumes.
//!
//! Output order: cover, table of contents, executive summary, value proposition,
//! scope of work & pricing, terms and conditions. The function is pure: the same
//! inputs always produce the same blocks.

use chrono::NaiveDate;
use tracing::debug;

use crate::brief::Brief;
use crate::document::blocks::{DocumentBlock, TableBlock};
use crate::document::styles::{
    BODY, HEADING, LIST, QUOTE, SUBHEADING, TABLE_CELL, TABLE_HEADER, TITLE,
};
use crate::errors::ProposalError;
use crate::generation::content::{ContractTerms, ValueProposition};
use crate::generation::GeneratedContent;

pub const PROPOSAL_TITLE: &str = "Project Proposal";
pub const TOC_TITLE: &str = "Table of Contents";
pub const EXECUTIVE_SUMMARY: &str = "Executive Summary";
pub const VALUE_PROPOSITION: &str = "Value Proposition";
pub const SCOPE_AND_PRICING: &str = "Scope of Work & Pricing";
pub const TERMS_AND_CONDITIONS: &str = "Terms and Conditions";

/// Sections listed in the table of contents, in document order.
pub const SECTION_TITLES: [&str; 4] = [
    EXECUTIVE_SUMMARY,
    VALUE_PROPOSITION,
    SCOPE_AND_PRICING,
    TERMS_AND_CONDITIONS,
];

const COVER_SPACER_LINES: u8 = 4;
const BULLET: &str = "\u{2022}";

/// Assembles the full proposal. Fails only when a content slot is missing or
/// holds the wrong kind of content.
pub fn assemble(
    brief: &Brief,
    content: &GeneratedContent,
    date: NaiveDate,
) -> Result<Vec<DocumentBlock>, ProposalError> {
    // Resolve every slot up front so a missing one fails before any block is built.
    let value_proposition = content.value_proposition()?;
    let scope_summary = content.scope_summary()?;
    let terms = content.terms()?;

    let mut out = BlockWriter::default();

    cover(&mut out, brief, date);
    table_of_contents(&mut out);
    executive_summary(&mut out, brief, scope_summary);
    value_proposition_section(&mut out, value_proposition);
    scope_and_pricing(&mut out, brief);
    terms_and_conditions(&mut out, brief, terms);

    debug!("Assembled {} document blocks", out.blocks.len());
    Ok(out.blocks)
}

#[derive(Default)]
struct BlockWriter {
    blocks: Vec<DocumentBlock>,
}

impl BlockWriter {
    fn heading(&mut self, text: impl Into<String>, style: &str) {
        self.blocks.push(DocumentBlock::heading(text, style));
    }

    fn paragraph(&mut self, text: impl Into<String>, style: &str) {
        self.blocks.push(DocumentBlock::paragraph(text, style));
    }

    fn bullets<'a>(&mut self, items: impl IntoIterator<Item = &'a String>) {
        for item in items {
            self.paragraph(format!("{BULLET} {item}"), LIST);
        }
    }

    fn push(&mut self, block: DocumentBlock) {
        self.blocks.push(block);
    }

    fn page_break(&mut self) {
        self.blocks.push(DocumentBlock::PageBreak);
    }
}

fn cover(out: &mut BlockWriter, brief: &Brief, date: NaiveDate) {
    out.heading(PROPOSAL_TITLE, TITLE);
    out.push(DocumentBlock::Spacer {
        lines: COVER_SPACER_LINES,
    });
    out.paragraph("Prepared for:", BODY);
    out.heading(brief.customer.name.as_str(), HEADING);
    if let Some(address) = &brief.customer.address {
        out.paragraph(address.as_str(), BODY);
    }
    out.paragraph(format!("Date: {}", date.format("%B %d, %Y")), BODY);
    out.page_break();
}

fn table_of_contents(out: &mut BlockWriter) {
    out.heading(TOC_TITLE, TITLE);
    for (i, title) in SECTION_TITLES.iter().enumerate() {
        out.paragraph(format!("{}. {}", i + 1, title), BODY);
    }
    out.page_break();
}

fn executive_summary(out: &mut BlockWriter, brief: &Brief, scope_summary: &str) {
    out.heading(EXECUTIVE_SUMMARY, TITLE);
    if let Some(seed) = &brief.product.value_proposition {
        out.paragraph(seed.as_str(), BODY);
    }
    out.paragraph(scope_summary, BODY);
    out.page_break();
}

fn value_proposition_section(out: &mut BlockWriter, vp: &ValueProposition) {
    out.heading(VALUE_PROPOSITION, TITLE);
    out.paragraph(vp.introduction.as_str(), BODY);
    for section in &vp.sections {
        out.heading(section.title.as_str(), HEADING);
        out.bullets(&section.points);
    }
    out.paragraph(vp.conclusion.as_str(), QUOTE);
    out.page_break();
}

fn scope_and_pricing(out: &mut BlockWriter, brief: &Brief) {
    out.heading(SCOPE_AND_PRICING, TITLE);

    if !brief.setup_items.is_empty() {
        out.heading("Included in Setup", SUBHEADING);
        out.bullets(&brief.setup_items);
    }

    out.heading("Pricing", SUBHEADING);
    out.push(DocumentBlock::Table(pricing_table(brief)));
    out.page_break();
}

/// One row per pricing item, in brief order. The Details column only appears
/// when at least one item carries a detail.
fn pricing_table(brief: &Brief) -> TableBlock {
    let with_detail = brief.pricing.iter().any(|p| p.detail.is_some());

    let mut columns = vec!["Item".to_string(), "Price".to_string()];
    if with_detail {
        columns.push("Details".to_string());
    }

    let rows = brief
        .pricing
        .iter()
        .map(|item| {
            let mut row = vec![item.label.clone(), item.price.clone()];
            if with_detail {
                row.push(item.detail.clone().unwrap_or_default());
            }
            row
        })
        .collect();

    TableBlock {
        columns,
        rows,
        header_style: TABLE_HEADER.to_string(),
        cell_style: TABLE_CELL.to_string(),
    }
}

fn terms_and_conditions(out: &mut BlockWriter, brief: &Brief, terms: &ContractTerms) {
    out.heading(TERMS_AND_CONDITIONS, TITLE);

    if !brief.payment_terms.is_empty() {
        out.heading("Payment Terms", HEADING);
        out.bullets(&brief.payment_terms);
    }

    for section in &terms.sections {
        out.heading(section.title.as_str(), HEADING);
        out.paragraph(section.content.as_str(), BODY);
        for sub in section.subsections.iter().flatten() {
            out.heading(sub.title.as_str(), SUBHEADING);
            out.paragraph(sub.content.as_str(), BODY);
        }
    }
}
