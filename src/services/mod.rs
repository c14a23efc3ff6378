//! Cart, wishlist and account stores over local storage.

mod accounts;
mod cart;
mod wishlist;

pub use accounts::*;
pub use cart::*;
pub use wishlist::*;
