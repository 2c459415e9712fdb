//! Declarative scene description handed to the host for painting.
//!
//! A scene is an immutable tree built fresh on every render. The widget does
//! not keep it around; the host owns whatever it paints from it.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::color::SerializableColor;

/// A node of the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneNode {
    Frame(FrameNode),
    Rectangle(RectangleNode),
    VectorImage(VectorImageNode),
}

/// Container node. Children are positioned relative to the frame's origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameNode {
    pub width: f64,
    pub height: f64,
    pub children: Vec<SceneNode>,
}

/// Solid filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleNode {
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub fill: SerializableColor,
}

/// Inline vector image given as SVG source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorImageNode {
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// SVG markup.
    pub src: String,
}

impl FrameNode {
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            children: Vec::new(),
        }
    }

    /// Append a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

impl RectangleNode {
    pub fn from_rect(rect: Rect, fill: SerializableColor) -> Self {
        Self {
            position: Point::new(rect.x0, rect.y0),
            width: rect.width(),
            height: rect.height(),
            fill,
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

impl VectorImageNode {
    pub fn new(placement: Rect, src: String) -> Self {
        Self {
            position: Point::new(placement.x0, placement.y0),
            width: placement.width(),
            height: placement.height(),
            src,
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

impl SceneNode {
    /// Bounds in the parent's coordinate space.
    pub fn bounds(&self) -> Rect {
        match self {
            SceneNode::Frame(f) => Rect::new(0.0, 0.0, f.width, f.height),
            SceneNode::Rectangle(r) => r.as_rect(),
            SceneNode::VectorImage(v) => v.as_rect(),
        }
    }

    /// Child nodes (empty for leaves).
    pub fn children(&self) -> &[SceneNode] {
        match self {
            SceneNode::Frame(f) => &f.children,
            _ => &[],
        }
    }

    pub fn as_frame(&self) -> Option<&FrameNode> {
        match self {
            SceneNode::Frame(f) => Some(f),
            _ => None,
        }
    }

    /// Every node of the tree in paint order (depth-first, parents first).
    pub fn nodes(&self) -> Vec<&SceneNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// All rectangles in the tree, in paint order.
    pub fn rectangles(&self) -> Vec<&RectangleNode> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                SceneNode::Rectangle(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// All vector images in the tree, in paint order.
    pub fn vector_images(&self) -> Vec<&VectorImageNode> {
        self.nodes()
            .into_iter()
            .filter_map(|node| match node {
                SceneNode::VectorImage(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    /// Serialize the tree for hosts that consume JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
