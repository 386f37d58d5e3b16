// Document model: style registry, block sequence and the assembler that builds it.
// Nothing here depends on the PDF library; see render/ for that.

pub mod assembler;
pub mod blocks;
pub mod styles;

pub use assembler::assemble;
pub use blocks::{DocumentBlock, TableBlock};
pub use styles::{StyleRegistry, StyleSpec};
