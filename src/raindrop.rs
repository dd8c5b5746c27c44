/*
 * Raindrop Module
 *
 * Depth-scaled raindrops. A drop's depth `z` decides how fast it falls, how
 * long its streak is and how thick it is drawn. Drops that reach the bottom
 * start again at the top.
 */

use nannou::color::LinSrgba;
use nannou::prelude::{vec2, Vec2};
use rand::Rng;

use crate::error::SimResult;
use crate::kinematics::{self, CanvasSize};
use crate::math::{random_range, scale};
use crate::params::RainParams;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub struct Raindrop {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub z: f32,
    /// Falling speed at spawn, restored after wrapping.
    pub base_speed: f32,
    pub length: f32,
    pub width: f32,
    pub color: LinSrgba,
}

pub fn create_raindrop<R: Rng + ?Sized>(
    rng: &mut R,
    params: &RainParams,
    size: CanvasSize,
    color: LinSrgba,
) -> SimResult<Raindrop> {
    let z = random_range(rng, 0.0, params.max_depth)?;
    let base_speed = scale(z, 0.0, params.max_depth, params.min_speed, params.max_speed)?;
    let position = vec2(
        random_range(rng, 0.0, size.width)?,
        random_range(rng, -size.height, 0.0)?,
    );

    Ok(Raindrop {
        position,
        velocity: vec2(0.0, base_speed),
        acceleration: Vec2::ZERO,
        z,
        base_speed,
        length: scale(z, 0.0, params.max_depth, params.min_length, params.max_length)?,
        width: scale(z, 0.0, params.max_depth, params.min_width, params.max_width)?,
        color,
    })
}

impl Raindrop {
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    pub fn update(&mut self, dt_secs: f32, size: CanvasSize) {
        kinematics::integrate(&mut self.position, &mut self.velocity, &mut self.acceleration, dt_secs);

        if self.position.y >= size.height {
            self.position.y = 0.0;
            self.velocity = vec2(0.0, self.base_speed);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.set_stroke(self.color);
        surface.set_line_width(self.width);
        surface.line(self.position, self.position + vec2(0.0, self.length));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn blue() -> LinSrgba {
        LinSrgba::new(0.1, 0.2, 0.4, 1.0)
    }

    #[test]
    fn test_create_raindrop_scales_with_depth() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = RainParams::default();
        let size = CanvasSize::new(640.0, 480.0);

        for _ in 0..50 {
            let drop = create_raindrop(&mut rng, &params, size, blue()).unwrap();
            assert!((0.0..=20.0).contains(&drop.z));
            assert!((50.0..=200.0).contains(&drop.velocity.y));
            assert!((10.0..=20.0).contains(&drop.length));
            assert!((1.0..=3.0).contains(&drop.width));
            assert!((-480.0..=0.0).contains(&drop.position.y));
            assert!((0.0..=640.0).contains(&drop.position.x));
        }
    }

    #[test]
    fn test_zero_depth_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = RainParams { max_depth: 0.0, ..RainParams::default() };
        assert!(create_raindrop(&mut rng, &params, CanvasSize::new(10.0, 10.0), blue()).is_err());
    }

    #[test]
    fn test_drop_wraps_to_top() {
        let mut rng = StdRng::seed_from_u64(9);
        let size = CanvasSize::new(100.0, 100.0);
        let mut drop = create_raindrop(&mut rng, &RainParams::default(), size, blue()).unwrap();
        drop.position = vec2(50.0, 99.0);
        drop.velocity = vec2(0.0, 500.0);

        drop.update(0.1, size);

        assert_eq!(drop.position.y, 0.0);
        assert_eq!(drop.velocity.y, drop.base_speed);
    }
}
