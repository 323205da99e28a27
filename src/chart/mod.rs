//! Chart building and rendering.
//!
//! [`build_figure`] turns league schedules into a format-independent
//! [`TimelineFigure`]; the submodules render it as Plotly JSON or SVG.

pub mod figure;
pub mod plotly;
pub mod svg;

pub use figure::{build_figure, Bar, TimelineFigure};
pub use plotly::to_plotly_json;
pub use svg::render_svg;
