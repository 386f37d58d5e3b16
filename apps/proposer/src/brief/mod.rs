pub mod models;
pub mod parser;

pub use models::Brief;
pub use parser::load_brief;
