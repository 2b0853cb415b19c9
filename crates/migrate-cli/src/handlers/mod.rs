pub mod boards;
pub mod completions;
pub mod migrate;
