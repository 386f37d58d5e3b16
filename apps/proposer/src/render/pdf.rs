//! PDF Renderer: turns the block sequence into a PDF on disk via `genpdf`.
//!
//! Style references are validated before anything touches the disk. The PDF is
//! written to a temporary file next to the target and renamed into place only
//! after rendering succeeds; on any failure the temporary file is dropped.

use std::fs;
use std::path::Path;

use genpdf::elements::{self, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element as _, Margins, PaperSize, SimplePageDecorator};
use tracing::{debug, info};

use crate::document::styles::TextAlign;
use crate::document::{DocumentBlock, StyleRegistry, StyleSpec, TableBlock};
use crate::errors::ProposalError;
use crate::render::fonts::FontSource;

/// Roughly one inch.
const PAGE_MARGIN_MM: i32 = 25;
const TABLE_CELL_PADDING_MM: i32 = 1;
const DEFAULT_TITLE: &str = "Proposal";

/// Renders `blocks` to `output_path`, creating the parent directory if needed.
pub fn render(
    blocks: &[DocumentBlock],
    styles: &StyleRegistry,
    fonts: &FontSource,
    output_path: &Path,
) -> Result<(), ProposalError> {
    validate_styles(blocks, styles)?;

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| {
        ProposalError::Render(format!(
            "cannot create output directory {}: {e}",
            dir.display()
        ))
    })?;

    let family = fonts.load()?;
    let document = build_document(blocks, styles, family)?;

    let mut staging = tempfile::Builder::new()
        .prefix(".proposal-")
        .suffix(".pdf.part")
        .tempfile_in(dir)
        .map_err(|e| {
            ProposalError::Render(format!("cannot write to {}: {e}", dir.display()))
        })?;
    debug!("Rendering into {}", staging.path().display());

    document.render(staging.as_file_mut())?;
    staging
        .as_file()
        .sync_all()
        .map_err(|e| ProposalError::Render(format!("failed to flush PDF: {e}")))?;
    staging.persist(output_path).map_err(|e| {
        ProposalError::Render(format!(
            "cannot move PDF into place at {}: {}",
            output_path.display(),
            e.error
        ))
    })?;

    info!("Proposal written to {}", output_path.display());
    Ok(())
}

/// Fails on the first style name the registry does not know.
pub fn validate_styles(
    blocks: &[DocumentBlock],
    styles: &StyleRegistry,
) -> Result<(), ProposalError> {
    for (index, block) in blocks.iter().enumerate() {
        for name in block.style_refs() {
            if styles.get(name).is_none() {
                return Err(ProposalError::Render(format!(
                    "block {index} references unknown style '{name}'"
                )));
            }
        }
    }
    Ok(())
}

fn build_document(
    blocks: &[DocumentBlock],
    styles: &StyleRegistry,
    family: genpdf::fonts::FontFamily<genpdf::fonts::FontData>,
) -> Result<genpdf::Document, ProposalError> {
    let mut doc = genpdf::Document::new(family);
    doc.set_title(document_title(blocks));
    doc.set_paper_size(PaperSize::Letter);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    doc.set_page_decorator(decorator);

    for block in blocks {
        match block {
            DocumentBlock::Heading { text, style } | DocumentBlock::Paragraph { text, style } => {
                let spec = styles.require(style)?;
                doc.push(styled_paragraph(text, spec));
            }
            DocumentBlock::Table(table) => doc.push(table_layout(table, styles)?),
            DocumentBlock::Spacer { lines } => doc.push(elements::Break::new(*lines)),
            DocumentBlock::PageBreak => doc.push(elements::PageBreak::new()),
        }
    }

    Ok(doc)
}

fn document_title(blocks: &[DocumentBlock]) -> String {
    blocks
        .iter()
        .find_map(|b| match b {
            DocumentBlock::Heading { text, .. } => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

fn styled_paragraph(text: &str, spec: &StyleSpec) -> impl genpdf::Element {
    Paragraph::new(text)
        .aligned(alignment(spec.align))
        .styled(text_style(spec))
        .padded(Margins::trbl(
            0,
            0,
            i32::from(spec.space_after_mm),
            i32::from(spec.indent_mm),
        ))
}

fn table_layout(table: &TableBlock, styles: &StyleRegistry) -> Result<TableLayout, ProposalError> {
    let header_spec = styles.require(&table.header_style)?;
    let cell_spec = styles.require(&table.cell_style)?;

    let mut layout = TableLayout::new(vec![1; table.columns.len()]);
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = layout.row();
    for column in &table.columns {
        header.push_element(table_cell(column, header_spec));
    }
    header.push()?;

    for row in &table.rows {
        let mut table_row = layout.row();
        for cell in row {
            table_row.push_element(table_cell(cell, cell_spec));
        }
        table_row.push()?;
    }

    Ok(layout)
}

fn table_cell(text: &str, spec: &StyleSpec) -> impl genpdf::Element {
    Paragraph::new(text)
        .aligned(alignment(spec.align))
        .styled(text_style(spec))
        .padded(TABLE_CELL_PADDING_MM)
}

fn text_style(spec: &StyleSpec) -> Style {
    let mut style = Style::new()
        .with_font_size(spec.font_size)
        .with_color(Color::Rgb(spec.color.0, spec.color.1, spec.color.2));
    if spec.bold {
        style = style.bold();
    }
    if spec.italic {
        style = style.italic();
    }
    style
}

fn alignment(align: TextAlign) -> Alignment {
    match align {
        TextAlign::Left => Alignment::Left,
        TextAlign::Center => Alignment::Center,
        TextAlign::Right => Alignment::Right,
    }
}
