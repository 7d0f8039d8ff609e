//! Temporal normalization and filtering
//!
//! Turns raw date text into years and restricts record collections to a
//! year window before graph assembly.

mod filter;
mod normalize;

pub use filter::{
    filter_by_year_range, get_date_range, limit, timeline, Limited, TimelineEntry,
    DEFAULT_MAX_RECORDS,
};
pub use normalize::normalize_year;
