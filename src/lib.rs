//! Season timelines of the NBA, NHL, NFL and MLB on a rolling 36-month axis.
//!
//! Phases are given either as fractional month numbers or as calendar dates
//! and are normalized onto one shared axis, where month 1 is January of the
//! year before today. The figure built from them is rendered as a Plotly
//! site, an SVG image, a CSV table or in the egui viewer.

pub mod app;
pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod schedule;
pub mod site;
pub mod ui;

pub use error::{Result, TimelineError};
