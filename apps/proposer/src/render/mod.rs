pub mod fonts;
pub mod pdf;

pub use fonts::FontSource;
pub use pdf::render;
