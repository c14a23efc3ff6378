//! Data models for the storefront state.
//!
//! Field names match the JSON the storefront pages already read and write.

mod account;
mod line_item;
mod product;

pub use account::*;
pub use line_item::*;
pub use product::*;
