use serde::Serialize;

/// A pricing or data table. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub header_style: String,
    pub cell_style: String,
}

/// One entry of the linear block sequence handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentBlock {
    Heading { text: String, style: String },
    Paragraph { text: String, style: String },
    Table(TableBlock),
    /// Vertical whitespace, measured in body lines.
    Spacer { lines: u8 },
    PageBreak,
}

impl DocumentBlock {
    pub fn heading(text: impl Into<String>, style: &str) -> Self {
        DocumentBlock::Heading {
            text: text.into(),
            style: style.to_string(),
        }
    }

    pub fn paragraph(text: impl Into<String>, style: &str) -> Self {
        DocumentBlock::Paragraph {
            text: text.into(),
            style: style.to_string(),
        }
    }

    /// Every style name this block refers to.
    pub fn style_refs(&self) -> Vec<&str> {
        match self {
            DocumentBlock::Heading { style, .. } | DocumentBlock::Paragraph { style, .. } => {
                vec![style.as_str()]
            }
            DocumentBlock::Table(table) => {
                vec![table.header_style.as_str(), table.cell_style.as_str()]
            }
            DocumentBlock::Spacer { .. } | DocumentBlock::PageBreak => Vec::new(),
        }
    }
}
