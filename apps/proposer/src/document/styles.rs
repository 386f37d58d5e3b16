//! Style Registry: immutable named styles referenced by document blocks.
//!
//! The registry is a flat lookup. There is no inheritance and no default
//! fallback: asking for a name that was never registered is an error, so a typo
//! in a style reference can never render as silently unstyled text.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::ProposalError;

pub const TITLE: &str = "title";
pub const HEADING: &str = "heading";
pub const SUBHEADING: &str = "subheading";
pub const BODY: &str = "body";
pub const QUOTE: &str = "quote";
pub const LIST: &str = "list";
pub const TABLE_HEADER: &str = "table_header";
pub const TABLE_CELL: &str = "table_cell";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
    #[allow(dead_code)]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a colour from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }
}

const BRAND_BLUE: Rgb = Rgb::hex(0x1a73e8);
const TEXT_DARK: Rgb = Rgb::hex(0x333333);
const TEXT_MUTED: Rgb = Rgb::hex(0x666666);
const BLACK: Rgb = Rgb::hex(0x000000);

/// A named paragraph or table style. Spacing is in whole millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleSpec {
    pub font_size: u8,
    pub color: Rgb,
    pub bold: bool,
    pub italic: bool,
    pub align: TextAlign,
    pub space_after_mm: u8,
    pub indent_mm: u8,
}

impl StyleSpec {
    const fn text(font_size: u8, color: Rgb, space_after_mm: u8) -> Self {
        StyleSpec {
            font_size,
            color,
            bold: false,
            italic: false,
            align: TextAlign::Left,
            space_after_mm,
            indent_mm: 0,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    const fn indented(mut self, indent_mm: u8) -> Self {
        self.indent_mm = indent_mm;
        self
    }

    const fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRegistry {
    styles: BTreeMap<String, StyleSpec>,
}

impl StyleRegistry {
    /// Creates a registry from `(name, spec)` pairs. Later duplicates replace earlier ones.
    pub fn from_styles<I, S>(styles: I) -> Self
    where
        I: IntoIterator<Item = (S, StyleSpec)>,
        S: Into<String>,
    {
        Self {
            styles: styles
                .into_iter()
                .map(|(name, spec)| (name.into(), spec))
                .collect(),
        }
    }

    /// The house style used for every proposal.
    pub fn proposal() -> Self {
        Self::from_styles([
            (TITLE, StyleSpec::text(24, BRAND_BLUE, 10).bold()),
            (HEADING, StyleSpec::text(18, TEXT_DARK, 7).bold()),
            (SUBHEADING, StyleSpec::text(14, TEXT_DARK, 4).bold()),
            (BODY, StyleSpec::text(12, TEXT_DARK, 4)),
            (QUOTE, StyleSpec::text(12, TEXT_MUTED, 7).italic().indented(10)),
            (LIST, StyleSpec::text(12, TEXT_DARK, 3).indented(10)),
            (
                TABLE_HEADER,
                StyleSpec::text(12, BRAND_BLUE, 0)
                    .bold()
                    .aligned(TextAlign::Center),
            ),
            (TABLE_CELL, StyleSpec::text(10, BLACK, 0)),
        ])
    }

    pub fn get(&self, name: &str) -> Option<&StyleSpec> {
        self.styles.get(name)
    }

    /// Looks up `name`, failing with a render error when it is not registered.
    pub fn require(&self, name: &str) -> Result<&StyleSpec, ProposalError> {
        self.get(name)
            .ok_or_else(|| ProposalError::Render(format!("unknown style '{name}'")))
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::proposal()
    }
}
