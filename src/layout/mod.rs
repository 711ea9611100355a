//! Layout engine for vertical virtualization.
//!
//! This module handles:
//! - Computing the inclusive row range to render for a scroll offset
//! - Managing viewport state (scroll position, height, row height)
//! - Mapping between row indices and content coordinates

mod range;
mod viewport;

pub use range::{vertical_range_to_render, vertical_range_with_overscan, RowRange, OVERSCAN_ROWS};
pub use viewport::Viewport;
