//! Renderer trait abstraction.

use hopover_core::scene::SceneNode;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Something that can turn a scene into output.
pub trait Renderer {
    /// What a render produces.
    type Output;

    /// Render a scene rooted at a frame.
    fn render(&mut self, scene: &SceneNode) -> RenderResult<Self::Output>;
}
