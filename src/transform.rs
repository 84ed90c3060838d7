//! Projection/view transform composition
//!
//! The module thinks in 4x4 homogeneous matrices; the host renders in 2D.
//! Incoming matrices are down-projected to the 2D affine sub-block (columns
//! 0, 1 and the translation column), which is lossy by design.
//!
//! The effective transform for any draw call is `projection * view * model`,
//! composed in that fixed order. Projection is outermost, so view and model
//! are always expressed in pre-projection (game) space.

use glam::{Affine2, Mat4, Vec2};

/// Extract the 2D affine sub-block of a 4x4 homogeneous matrix
pub fn affine_from_mat4(m: Mat4) -> Affine2 {
    Affine2::from_cols(
        Vec2::new(m.x_axis.x, m.x_axis.y),
        Vec2::new(m.y_axis.x, m.y_axis.y),
        Vec2::new(m.w_axis.x, m.w_axis.y),
    )
}

/// The two long-lived transforms of a running session
#[derive(Debug, Clone, Copy)]
pub struct Transforms {
    projection: Affine2,
    view: Affine2,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            projection: Affine2::IDENTITY,
            view: Affine2::IDENTITY,
        }
    }
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the projection from the surface size: game origin maps to the
    /// surface center, identity scale and rotation.
    ///
    /// Host-privileged. The module cannot override the projection because it
    /// depends on the rendering backend, not on game logic.
    pub fn set_projection(&mut self, width: f32, height: f32) {
        self.projection = Affine2::from_translation(Vec2::new(width / 2.0, height / 2.0));
    }

    /// Set the camera transform from the module's 4x4 matrix
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view = affine_from_mat4(matrix);
    }

    pub fn projection(&self) -> Affine2 {
        self.projection
    }

    pub fn view(&self) -> Affine2 {
        self.view
    }

    /// The transform applied to draws with no model matrix (e.g. text)
    pub fn screen_transform(&self) -> Affine2 {
        self.projection * self.view
    }

    /// The effective transform for a draw call with the given model matrix
    pub fn compose_for_draw(&self, model: Mat4) -> Affine2 {
        self.projection * self.view * affine_from_mat4(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn coeffs(a: Affine2) -> [f32; 6] {
        a.to_cols_array()
    }

    #[test]
    fn projection_maps_origin_to_surface_center() {
        let mut t = Transforms::new();
        t.set_projection(800.0, 600.0);
        let composed = t.compose_for_draw(Mat4::IDENTITY);
        assert_eq!(coeffs(composed), [1.0, 0.0, 0.0, 1.0, 400.0, 300.0]);
    }

    #[test]
    fn view_extraction_drops_z() {
        let mut t = Transforms::new();
        let view = Mat4::from_translation(Vec3::new(10.0, -5.0, 99.0));
        t.set_view(view);
        assert_eq!(coeffs(t.view()), [1.0, 0.0, 0.0, 1.0, 10.0, -5.0]);
    }

    #[test]
    fn composition_order_is_projection_view_model() {
        let mut t = Transforms::new();
        t.set_projection(200.0, 200.0);
        t.set_view(Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
        let model = Mat4::from_translation(Vec3::new(0.0, 7.0, 0.0));
        let composed = t.compose_for_draw(model);
        // Model point (0,0) -> model (0,7) -> view (5,7) -> projection (105,107)
        let p = composed.transform_point2(Vec2::ZERO);
        assert_eq!(p, Vec2::new(105.0, 107.0));
    }

    #[test]
    fn view_scale_applies_before_projection_translation() {
        let mut t = Transforms::new();
        t.set_projection(100.0, 100.0);
        t.set_view(Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0)));
        let p = t
            .compose_for_draw(Mat4::IDENTITY)
            .transform_point2(Vec2::new(3.0, 4.0));
        assert_eq!(p, Vec2::new(56.0, 58.0));
    }

    #[test]
    fn affine_from_mat4_reads_columns_0_1_3() {
        let mut cols = [0.0f32; 16];
        cols[0] = 1.0; // a
        cols[1] = 2.0; // b
        cols[4] = 3.0; // c
        cols[5] = 4.0; // d
        cols[12] = 5.0; // e
        cols[13] = 6.0; // f
        cols[10] = 9.0; // z scale, ignored
        cols[15] = 1.0;
        let affine = affine_from_mat4(Mat4::from_cols_array(&cols));
        assert_eq!(coeffs(affine), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
