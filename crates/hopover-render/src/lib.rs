//! Hopover Render Library
//!
//! Turns the widget's scene description into output a host or tool can show.
//! The only implementation is a standalone SVG document export.

mod renderer;
mod svg;

pub use renderer::{RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
