use crate::coords::{Mat4, Rect};

/// Caller-owned projection state for a draw pass.
///
/// Holds the precomputed `projection · view` term; per-quad model transforms
/// are right-multiplied in [`Self::mvp_for`]. Uploading the resulting matrix
/// and issuing the draw call belong to the rendering collaborator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderContext {
    proj_view: Mat4,
}

impl RenderContext {
    #[inline]
    pub fn new(proj_view: Mat4) -> Self {
        Self { proj_view }
    }

    /// Pixel-space projection for a `width`×`height` canvas, origin
    /// bottom-left, identity view.
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self::new(Mat4::orthographic(0.0, width, 0.0, height, -1.0, 1.0))
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj_view
    }

    /// Full MVP for a unit quad stretched over `rect`: the model term is
    /// `translate(origin) · scale(size)`, so the quad's `(0,0)..(1,1)` corners
    /// land on the rectangle before projection.
    pub fn mvp_for(&self, rect: Rect) -> Mat4 {
        let model = Mat4::translate(rect.origin.x, rect.origin.y, 0.0)
            * Mat4::scale(rect.size.x, rect.size.y, 1.0);
        self.proj_view * model
    }
}
