use thiserror::Error;

use crate::math::{Matrix2D, Vec2};

/// Source rectangle in sheet pixel coordinates for cropped blits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to draw image {image:?}: {reason}")]
pub struct RenderError {
    pub image: String,
    pub reason: String,
}

/// Drawing surface the engine renders into. The engine only ever calls
/// these verbs; pixel loading and presentation live behind the
/// implementation.
pub trait Renderer {
    fn save(&mut self);
    fn restore(&mut self);
    fn apply_transform(&mut self, matrix: Matrix2D);
    fn draw_image(
        &mut self,
        image: &str,
        source: Option<PixelRect>,
        dest_size: Vec2,
    ) -> Result<(), RenderError>;
    fn clear(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Transform(Matrix2D),
    Image {
        image: String,
        source: Option<PixelRect>,
        dest_size: Vec2,
    },
    Clear,
}

/// Renderer that records every draw call, for tests and headless runs.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    ops: Vec<DrawOp>,
}

impl FrameRecorder {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Image draw ops in emission order, skipping state bookkeeping.
    pub fn drawn_images(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { image, .. } => Some(image.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for FrameRecorder {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn apply_transform(&mut self, matrix: Matrix2D) {
        self.ops.push(DrawOp::Transform(matrix));
    }

    fn draw_image(
        &mut self,
        image: &str,
        source: Option<PixelRect>,
        dest_size: Vec2,
    ) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Image {
            image: image.to_string(),
            source,
            dest_size,
        });
        Ok(())
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }
}
