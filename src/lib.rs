pub mod arguments;
pub mod parsers;
pub mod version;
