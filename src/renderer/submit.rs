//! Per-frame draw submission
//!
//! Walks the game state and issues one draw per visible object, in a fixed
//! order, each with its final model-view-projection matrix. The sink decides
//! what a draw means (a GPU call, or a recorded list for headless runs).

use glam::{Mat4, Vec2, Vec3};

use super::mesh::MeshHandle;
use super::vertex::colors;
use crate::consts::*;
use crate::sim::{GameState, MIRRORS, Projectile};

/// Receiver of draw calls
pub trait DrawSink {
    /// Start a new frame cleared to `clear_color` (RGBA)
    fn begin_frame(&mut self, clear_color: [f32; 4]);
    fn submit(&mut self, mesh: MeshHandle, mvp: Mat4);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshHandle,
    pub mvp: Mat4,
}

/// Sink that records the latest frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    clear_color: Option<[f32; 4]>,
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear color of the recorded frame, if one was started
    pub fn clear_color(&self) -> Option<[f32; 4]> {
        self.clear_color
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl DrawSink for DrawList {
    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.clear_color = Some(clear_color);
        self.calls.clear();
    }

    fn submit(&mut self, mesh: MeshHandle, mvp: Mat4) {
        self.calls.push(DrawCall { mesh, mvp });
    }
}

#[inline]
fn translate(p: Vec2) -> Mat4 {
    Mat4::from_translation(Vec3::new(p.x, p.y, 0.0))
}

/// Model matrix of the shooter
pub fn shooter_model(shooter_y: f32, aim_deg: f32) -> Mat4 {
    translate(Vec2::new(SHOOTER_X, shooter_y)) * Mat4::from_rotation_z(aim_deg.to_radians())
}

/// Model matrix of a projectile: rotate about the ray start, then slide along it
pub fn projectile_model(p: &Projectile) -> Mat4 {
    translate(p.ray_start())
        * Mat4::from_rotation_z(p.angle_deg.to_radians())
        * Mat4::from_translation(Vec3::new(p.distance, 0.0, 0.0))
}

/// Submit the whole frame
pub fn render_frame(state: &GameState, sink: &mut impl DrawSink) {
    let vp = state.camera().view_projection();
    let controls = state.controls();
    sink.begin_frame(colors::BACKGROUND);
    let mut draw = |mesh: MeshHandle, model: Mat4| sink.submit(mesh, vp * model);

    draw(
        MeshHandle::Shooter,
        shooter_model(controls.shooter_y, controls.aim_deg),
    );
    for projectile in state.registry().projectiles() {
        draw(MeshHandle::Projectile, projectile_model(projectile));
    }
    draw(
        MeshHandle::Stand,
        translate(Vec2::new(STAND_X, controls.shooter_y)),
    );
    draw(
        MeshHandle::GreenBasket,
        translate(Vec2::new(controls.right_basket_x(), BASKET_Y)),
    );
    for brick in state.registry().bricks() {
        draw(MeshHandle::brick(brick.class), translate(brick.pos));
    }
    draw(
        MeshHandle::RedBasket,
        translate(Vec2::new(controls.left_basket_x(), BASKET_Y)),
    );
    for mirror in &MIRRORS {
        draw(MeshHandle::mirror(mirror.lean), translate(mirror.center));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BrickClass;

    #[test]
    fn test_frame_order() {
        let mut state = GameState::new(1);
        state.registry.spawn_brick(BrickClass::Green, Vec2::new(1.0, 2.0));
        state.registry.spawn_projectile(Vec2::new(-3.45, 0.0), 0.0);
        state.registry.spawn_brick(BrickClass::Black, Vec2::new(-1.0, 2.0));

        let mut list = DrawList::new();
        render_frame(&state, &mut list);

        let meshes: Vec<_> = list.calls().iter().map(|c| c.mesh).collect();
        assert_eq!(
            meshes,
            vec![
                MeshHandle::Shooter,
                MeshHandle::Projectile,
                MeshHandle::Stand,
                MeshHandle::GreenBasket,
                MeshHandle::GreenBrick,
                MeshHandle::BlackBrick,
                MeshHandle::RedBasket,
                MeshHandle::MirrorRising,
                MeshHandle::MirrorRising,
                MeshHandle::MirrorFalling,
                MeshHandle::MirrorFalling,
            ]
        );
    }

    #[test]
    fn test_empty_field_draws_fixed_scenery() {
        let mut list = DrawList::new();
        render_frame(&GameState::new(2), &mut list);
        assert_eq!(list.len(), 8);
        assert_eq!(list.clear_color(), Some(colors::BACKGROUND));
    }

    #[test]
    fn test_each_frame_replaces_the_last() {
        let mut state = GameState::new(5);
        state.registry.spawn_brick(BrickClass::Red, Vec2::ZERO);
        let mut list = DrawList::new();
        render_frame(&state, &mut list);
        assert_eq!(list.len(), 9);

        render_frame(&GameState::new(5), &mut list);
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn test_projectile_model_tracks_position() {
        let mut state = GameState::new(3);
        let id = state.registry.spawn_projectile(Vec2::new(-3.45, 0.5), 30.0);
        let p = state.registry.projectile_mut(id).unwrap();
        for _ in 0..12 {
            p.advance();
        }
        p.bounce(p.position(), 96.0);
        for _ in 0..5 {
            p.advance();
        }

        let p = state.registry().projectile(id).unwrap();
        let at = projectile_model(p).transform_point3(Vec3::ZERO);
        assert!((at.truncate() - p.position()).length() < 1e-5);
    }

    #[test]
    fn test_mvp_includes_camera() {
        let mut state = GameState::new(4);
        state.camera.pan = 1.0;

        let mut list = DrawList::new();
        render_frame(&state, &mut list);
        let stand = list
            .calls()
            .iter()
            .find(|c| c.mesh == MeshHandle::Stand)
            .unwrap();
        let expected = state.camera().view_projection() * translate(Vec2::new(STAND_X, 0.0));
        assert_eq!(stand.mvp, expected);
    }

    #[test]
    fn test_shooter_tip_follows_aim() {
        let tip = shooter_model(1.0, 90.0).transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!((tip.x - SHOOTER_X).abs() < 1e-5);
        assert!((tip.y - 1.5).abs() < 1e-5);
    }
}
