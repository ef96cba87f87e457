#![forbid(unsafe_code)]

mod filter;
mod state;

pub use filter::by_category;
pub use state::ViewState;
