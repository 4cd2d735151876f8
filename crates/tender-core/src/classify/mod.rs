pub mod document;

pub use document::classify_document;
