pub mod normalize;
pub mod rates;
pub mod values;

pub use normalize::normalize_text;
pub use rates::parse_rate_sheet;
