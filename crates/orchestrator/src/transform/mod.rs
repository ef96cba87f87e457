#![forbid(unsafe_code)]

//! Pure projections from upstream records to what the presentation layer shows.

mod card;
mod currency;
mod dates;
mod detail;

pub use card::{ALL_CATEGORY, categories, to_display_record, to_display_records};
pub use currency::{USD_TO_IDR, convert_to_idr, is_convertible};
pub use dates::{format_detail_time, format_update_time};
pub use detail::to_detail_record;
