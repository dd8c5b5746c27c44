/*
 * Walker Module
 *
 * Self-propelled dots with three movement modes:
 * - Linear: constant velocity along the walker's heading.
 * - Sine: forward motion plus a perpendicular oscillation driven by the
 *   walker's accumulated time.
 * - Noise: the heading drifts with coherent noise sampled at the walker's
 *   position, bounded by a maximum turn rate.
 *
 * Headings are radians. Noise mode needs the canvas bounds to map positions
 * into noise space and fails without them.
 */

use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

use nannou::prelude::Vec2;
use noise::NoiseFn;
use rand::Rng;

use crate::error::{SimError, SimResult};
use crate::kinematics::{self, CanvasSize, EdgePolicy};
use crate::math::{scale, scale_clamp};
use crate::params::{WalkerModeKind, WalkerParams};
use crate::surface::{hsl_color, Surface};
use crate::vector::{self, VectorExt};

/// Side length of the noise space positions are mapped into.
const NOISE_SPACE: f32 = 255.0;

const SATURATION: f32 = 0.77;
const LIGHTNESS: f32 = 0.41;
const TAIL_MAX_ALPHA: f32 = 0.8;
const TAIL_MIN_WIDTH: f32 = 1.0;
const TAIL_MAX_WIDTH: f32 = 7.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementMode {
    Linear,
    Sine {
        amplitude: f32,
        /// Radians per millisecond.
        frequency: f32,
        /// Accumulated milliseconds.
        time: f32,
    },
    Noise {
        scale: f32,
        /// Radians per second.
        max_turn_rate: f32,
    },
}

impl MovementMode {
    pub fn from_params(params: &WalkerParams) -> Self {
        match params.mode {
            WalkerModeKind::Linear => MovementMode::Linear,
            WalkerModeKind::Sine => MovementMode::Sine {
                amplitude: params.sine_amplitude,
                frequency: params.sine_frequency,
                time: 0.0,
            },
            WalkerModeKind::Noise => MovementMode::Noise {
                scale: params.noise_scale,
                max_turn_rate: params.noise_max_turn_rate.to_radians(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    pub position: Vec2,
    pub velocity: Vec2,
    /// px/s
    pub speed: f32,
    pub radius: f32,
    /// Degrees.
    pub hue: f32,
    /// Heading in radians, kept in [0, 2π).
    pub direction: f32,
    pub mode: MovementMode,
    /// Per-walker offset into noise space so walkers do not move in lockstep.
    pub noise_offset: f32,
    pub tail: VecDeque<Vec2>,
    pub tail_length: usize,
}

pub fn create_walker<R: Rng + ?Sized>(
    rng: &mut R,
    position: Vec2,
    mode: MovementMode,
    speed: f32,
    radius: f32,
) -> Walker {
    Walker {
        position,
        velocity: Vec2::ZERO,
        speed,
        radius,
        hue: rng.gen_range(0.0..360.0),
        direction: rng.gen_range(0.0..TAU),
        mode,
        noise_offset: rng.gen_range(0.0..NOISE_SPACE),
        tail: VecDeque::new(),
        tail_length: 0,
    }
}

impl Walker {
    pub fn with_tail(mut self, tail_length: usize) -> Self {
        self.tail_length = tail_length;
        self.tail = VecDeque::with_capacity(tail_length);
        self
    }

    /// Recompute the velocity for this tick from the movement mode.
    pub fn update_movement<N: NoiseFn<f64, 2>>(
        &mut self,
        dt_ms: f64,
        bounds: Option<CanvasSize>,
        noise: &N,
    ) -> SimResult<()> {
        match &mut self.mode {
            MovementMode::Linear => {
                self.velocity = vector::from_angle(self.direction, self.speed);
            }
            MovementMode::Sine { amplitude, frequency, time } => {
                *time += dt_ms as f32;

                let forward = vector::from_angle(self.direction, 1.0);
                let perpendicular = Vec2::new(-forward.y, forward.x);
                let oscillation = (*time * *frequency).sin() * *amplitude;

                self.velocity = forward * self.speed + perpendicular * oscillation;
            }
            MovementMode::Noise { scale: noise_scale, max_turn_rate } => {
                let bounds = bounds.ok_or(SimError::MissingBounds)?;

                let mapped_x = scale(self.position.x, 0.0, bounds.width, 0.0, NOISE_SPACE)?;
                let mapped_y = scale(self.position.y, 0.0, bounds.height, 0.0, NOISE_SPACE)?;
                let sample = noise
                    .get([
                        ((mapped_x + self.noise_offset) * *noise_scale) as f64,
                        ((mapped_y + self.noise_offset) * *noise_scale) as f64,
                    ])
                    .clamp(-1.0, 1.0) as f32;

                let turn = sample * *max_turn_rate * kinematics::ms_to_secs(dt_ms);
                self.direction = (self.direction + turn).rem_euclid(TAU);
                self.velocity = vector::from_angle(self.direction, self.speed);
            }
        }

        Ok(())
    }

    /// Wrap to the opposite edge, or reflect the heading off the wall it is
    /// moving into.
    pub fn handle_edges(&mut self, policy: EdgePolicy, size: CanvasSize) {
        match policy {
            EdgePolicy::Wrap => {
                kinematics::wrap(&mut self.position, size);
            }
            EdgePolicy::Bounce => {
                let heading = vector::from_angle(self.direction, 1.0);

                if (self.position.x <= 0.0 && heading.x < 0.0)
                    || (self.position.x >= size.width && heading.x > 0.0)
                {
                    self.direction = PI - self.direction;
                }
                if (self.position.y <= 0.0 && heading.y < 0.0)
                    || (self.position.y >= size.height && heading.y > 0.0)
                {
                    self.direction = -self.direction;
                }

                self.direction = self.direction.rem_euclid(TAU);
                self.position.x = self.position.x.clamp(0.0, size.width);
                self.position.y = self.position.y.clamp(0.0, size.height);
            }
        }
    }

    pub fn advance(&mut self, dt_ms: f64) {
        self.position += self.velocity * kinematics::ms_to_secs(dt_ms);

        if self.tail_length > 0 {
            self.tail.push_back(self.position);
            while self.tail.len() > self.tail_length {
                self.tail.pop_front();
            }
        }
    }

    pub fn clear_tail(&mut self) {
        self.tail.clear();
    }

    pub fn heading(&self) -> f32 {
        self.velocity.to_angle()
    }

    pub fn draw(&self, surface: &mut dyn Surface, show_tail: bool) {
        if show_tail && self.tail.len() > 1 {
            let segments = self.tail.len() - 1;
            for (i, (from, to)) in self.tail.iter().zip(self.tail.iter().skip(1)).enumerate() {
                // Segments crossing a wrapped edge would streak across the canvas.
                if from.distance(*to) > self.speed {
                    continue;
                }

                let t = (i + 1) as f32 / segments as f32;
                let alpha = scale_clamp(t.powf(1.5), 0.0, 1.0, 0.0, TAIL_MAX_ALPHA).unwrap_or(TAIL_MAX_ALPHA);
                let width = scale_clamp(t, 0.0, 1.0, TAIL_MIN_WIDTH, TAIL_MAX_WIDTH).unwrap_or(TAIL_MAX_WIDTH);
                surface.set_stroke(hsl_color(self.hue, SATURATION, LIGHTNESS, alpha));
                surface.set_line_width(width);
                surface.line(*from, *to);
            }
        }

        surface.set_fill(hsl_color(self.hue, SATURATION, LIGHTNESS, 1.0));
        surface.fill_circle(self.position, self.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use nannou::prelude::vec2;
    use noise::OpenSimplex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn walker(mode: MovementMode) -> Walker {
        let mut rng = StdRng::seed_from_u64(11);
        create_walker(&mut rng, vec2(100.0, 100.0), mode, 150.0, 5.0)
    }

    #[test]
    fn test_create_walker_ranges() {
        let w = walker(MovementMode::Linear);
        assert!((0.0..TAU).contains(&w.direction));
        assert!((0.0..360.0).contains(&w.hue));
        assert!((0.0..NOISE_SPACE).contains(&w.noise_offset));
        assert_eq!(w.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_linear_moves_at_speed() {
        let mut w = walker(MovementMode::Linear);
        w.direction = 0.0;
        let noise = OpenSimplex::new(0);

        w.update_movement(1000.0, None, &noise).unwrap();
        w.advance(1000.0);

        assert!((w.position.x - 250.0).abs() < 1e-3);
        assert!((w.position.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_sine_accumulates_time() {
        let mode = MovementMode::Sine { amplitude: 50.0, frequency: 0.02, time: 0.0 };
        let mut w = walker(mode);
        w.direction = 0.0;
        let noise = OpenSimplex::new(0);

        w.update_movement(16.0, None, &noise).unwrap();
        w.update_movement(16.0, None, &noise).unwrap();

        match w.mode {
            MovementMode::Sine { time, .. } => assert_eq!(time, 32.0),
            other => panic!("mode changed to {:?}", other),
        }
        assert!((w.velocity.x - 150.0).abs() < 1e-3);
        assert!((w.velocity.y - (32.0f32 * 0.02).sin() * 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_noise_requires_bounds() {
        let mode = MovementMode::Noise { scale: 0.01, max_turn_rate: 15f32.to_radians() };
        let mut w = walker(mode);
        let noise = OpenSimplex::new(0);

        let err = w.update_movement(16.0, None, &noise).unwrap_err();
        assert!(matches!(err, SimError::MissingBounds));
    }

    #[test]
    fn test_noise_turn_is_bounded() {
        let max_turn_rate = 15f32.to_radians();
        let mut w = walker(MovementMode::Noise { scale: 0.01, max_turn_rate });
        let noise = OpenSimplex::new(5);
        let size = CanvasSize::new(800.0, 600.0);

        for _ in 0..20 {
            let before = w.direction;
            w.update_movement(100.0, Some(size), &noise).unwrap();
            let mut turned = (w.direction - before).abs();
            if turned > PI {
                turned = TAU - turned;
            }
            assert!(turned <= max_turn_rate * 0.1 + 1e-5);
            assert!((w.velocity.magnitude() - 150.0).abs() < 1e-2);
            w.advance(100.0);
        }
    }

    #[test]
    fn test_wrap_edges() {
        let mut w = walker(MovementMode::Linear);
        w.position = vec2(801.0, 300.0);
        w.handle_edges(EdgePolicy::Wrap, CanvasSize::new(800.0, 600.0));
        assert_eq!(w.position.x, 0.0);
    }

    #[test]
    fn test_bounce_reflects_heading() {
        let size = CanvasSize::new(800.0, 600.0);
        let mut w = walker(MovementMode::Linear);

        // Heading left into the left wall.
        w.position = vec2(0.0, 300.0);
        w.direction = PI;
        w.handle_edges(EdgePolicy::Bounce, size);
        assert!(w.direction.abs() < 1e-5 || (w.direction - TAU).abs() < 1e-5);

        // Already heading away: untouched.
        w.direction = 0.25;
        w.handle_edges(EdgePolicy::Bounce, size);
        assert_eq!(w.direction, 0.25);

        // Heading down into the floor.
        w.position = vec2(300.0, 600.0);
        w.direction = PI / 2.0;
        w.handle_edges(EdgePolicy::Bounce, size);
        assert!((w.direction - 3.0 * PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_tail_is_bounded_and_fades_in() {
        let mut w = walker(MovementMode::Linear).with_tail(5);
        w.direction = 0.0;
        let noise = OpenSimplex::new(0);
        for _ in 0..12 {
            w.update_movement(16.0, None, &noise).unwrap();
            w.advance(16.0);
        }
        assert_eq!(w.tail.len(), 5);

        let mut surface = RecordingSurface::new();
        w.draw(&mut surface, true);
        assert_eq!(surface.lines(), 4);
        assert_eq!(surface.circles(), 1);

        let alphas: Vec<f32> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { color, .. } => Some(color.alpha),
                _ => None,
            })
            .collect();
        assert!(alphas.windows(2).all(|w| w[0] < w[1]));
        assert!(alphas.iter().all(|&a| a > 0.0 && a <= TAIL_MAX_ALPHA + 1e-5));

        let widths: Vec<f32> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { line_width, .. } => Some(*line_width),
                _ => None,
            })
            .collect();
        assert!(widths.iter().all(|&w| (TAIL_MIN_WIDTH..=TAIL_MAX_WIDTH).contains(&w)));
        assert!((widths[widths.len() - 1] - TAIL_MAX_WIDTH).abs() < 1e-5);
    }
}
