//! Nearest-site fields: a discrete Voronoi partition of a grid over the site store.
//!
//! [`FieldGrid`] describes the cell layout, [`build_field`] runs the priority flood, and
//! [`NearestSiteField`] stores the result for lookups and compositing.
pub mod builder;
pub mod grid;
pub mod nearest;

pub use builder::{build_field, squared_distance};
pub use grid::FieldGrid;
pub use nearest::NearestSiteField;
