//! Standalone SVG export of a scene.

use std::fmt::Write;

use hopover_core::color::SerializableColor;
use hopover_core::scene::{FrameNode, RectangleNode, SceneNode, VectorImageNode};

use crate::renderer::{RenderResult, Renderer, RendererError};

/// Renders a scene into an SVG document string.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// Output pixels per scene unit.
    pub scale: f64,
    /// Optional background fill behind the frame.
    pub background: Option<SerializableColor>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }

    /// Set the output scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set a background fill.
    pub fn with_background(mut self, color: SerializableColor) -> Self {
        self.background = Some(color);
        self
    }

    fn write_node(out: &mut String, node: &SceneNode) {
        match node {
            SceneNode::Frame(frame) => {
                out.push_str("<g>");
                Self::write_children(out, frame);
                out.push_str("</g>");
            }
            SceneNode::Rectangle(rect) => Self::write_rect(out, rect),
            SceneNode::VectorImage(image) => Self::write_image(out, image),
        }
    }

    fn write_children(out: &mut String, frame: &FrameNode) {
        for child in &frame.children {
            Self::write_node(out, child);
        }
    }

    fn write_rect(out: &mut String, rect: &RectangleNode) {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
            rect.position.x,
            rect.position.y,
            rect.width,
            rect.height,
            rect.fill.to_hex()
        );
        if rect.fill.a != 255 {
            let _ = write!(out, r#" fill-opacity="{}""#, rect.fill.opacity());
        }
        out.push_str("/>");
    }

    fn write_image(out: &mut String, image: &VectorImageNode) {
        use base64::{Engine, engine::general_purpose::STANDARD};
        let _ = write!(
            out,
            r#"<image x="{}" y="{}" width="{}" height="{}" href="data:image/svg+xml;base64,{}"/>"#,
            image.position.x,
            image.position.y,
            image.width,
            image.height,
            STANDARD.encode(image.src.as_bytes())
        );
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, scene: &SceneNode) -> RenderResult<String> {
        let frame = scene
            .as_frame()
            .ok_or_else(|| RendererError::InvalidScene("root node must be a frame".to_string()))?;
        let bounds = scene.bounds();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(RendererError::InvalidScene(format!(
                "frame has empty size {}x{}",
                bounds.width(),
                bounds.height()
            )));
        }

        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            bounds.width() * self.scale,
            bounds.height() * self.scale,
            bounds.width(),
            bounds.height()
        );
        if let Some(background) = self.background {
            Self::write_rect(&mut out, &RectangleNode::from_rect(bounds, background));
        }
        Self::write_children(&mut out, frame);
        out.push_str("</svg>");

        log::debug!("Rendered scene to {} bytes of SVG", out.len());
        Ok(out)
    }
}
