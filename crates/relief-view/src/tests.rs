#[cfg(test)]
mod tests {
    use glam::Vec3;
    use relief_core::constants::MIN_ZOOM_RADIUS;
    use relief_core::types::{GridResolution, Viewport};

    use crate::camera::{DragInput, OrbitCamera};
    use crate::frame::FrameComposer;

    fn drag(dx: f32, dy: f32) -> DragInput {
        DragInput {
            dx,
            dy,
            viewport: Viewport::new(1280.0, 720.0),
            aspect_ratio: 16.0 / 9.0,
        }
    }

    /// A long sequence of mixed input keeps the camera inside its bounds and
    /// every composed matrix finite.
    #[test]
    fn test_navigation_session_stays_bounded() {
        let resolution = GridResolution::new(120, 80);
        let composer = FrameComposer::new(resolution, 0.5);
        let floor = composer.world_height(23.0);
        let mut camera = OrbitCamera::for_terrain(resolution, Some(floor));

        for step in 0..400 {
            let phase = step as f32 * 0.37;
            match step % 3 {
                0 => {
                    camera.on_drag(&drag(phase.sin() * 90.0, phase.cos() * 60.0));
                }
                1 => {
                    camera.on_scroll(phase.sin() * 1.5);
                }
                _ => {
                    camera.on_drag(&drag(-40.0, 35.0));
                }
            }

            assert!(camera.radius() >= MIN_ZOOM_RADIUS - 1e-3, "step {step}");
            assert!(camera.eye().z > floor, "step {step}: {:?}", camera.eye());

            let frame = composer.compose(step, step as f32 / 60.0, &camera, 16.0 / 9.0);
            assert!(frame.uniforms.tr_matrix.is_finite(), "step {step}");
        }
    }

    /// A rejected update leaves the composed frame identical.
    #[test]
    fn test_rejected_update_keeps_frame() {
        let composer = FrameComposer::new(GridResolution::new(10, 10), 1.0);
        let mut camera = OrbitCamera::new(Vec3::new(0.5, 0.0, 50.0));
        let before = composer.compose(0, 0.0, &camera, 1.0);
        assert!(!camera.on_drag(&drag(25.0, 0.0)));
        assert!(!camera.on_scroll(4.0));
        let after = composer.compose(0, 0.0, &camera, 1.0);
        assert_eq!(before, after);
    }
}
