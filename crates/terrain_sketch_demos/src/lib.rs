#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{draw_site_markers, init_tracing, save_png, MarkerStyle};
