//! Year-range tools

mod date_range;
mod filter_records;

pub use date_range::DateRangeTool;
pub use filter_records::FilterRecordsTool;
