//! Data types shared by the grouping, flattening and rendering stages.

mod group;
mod row;

pub use group::*;
pub use row::*;
