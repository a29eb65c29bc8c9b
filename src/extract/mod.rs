//! Grid scanning: locating unit blocks, reading the co-owner and pulling the
//! labelled amounts out of each block's window.

pub mod fields;
pub mod locator;
pub mod money;
pub mod owner;

pub use fields::{WindowEnd, WindowScan, extract_fields};
pub use locator::{BlockLocator, locate_blocks};
pub use money::{format_amount, parse_amount};
pub use owner::extract_owner;
