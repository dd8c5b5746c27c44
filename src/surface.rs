/*
 * Drawing Surface Module
 *
 * The primitive drawing contract every simulation renders through. Coordinates
 * are canvas coordinates: origin at the top-left corner, y growing downwards,
 * units in pixels. Fill color, stroke color and line width are sticky state,
 * the same way a 2D canvas context behaves.
 *
 * `renderer::NannouSurface` maps this onto nannou's `Draw`; `RecordingSurface`
 * captures the calls so simulations can be tested without a window.
 */

use nannou::color::{hsla, IntoLinSrgba, LinSrgba};
use nannou::prelude::Vec2;

pub trait Surface {
    fn set_fill(&mut self, color: LinSrgba);
    fn set_stroke(&mut self, color: LinSrgba);
    fn set_line_width(&mut self, width: f32);

    /// Reset a rectangle to the background color.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32);
    fn line(&mut self, from: Vec2, to: Vec2);
    fn fill_polygon(&mut self, points: &[Vec2]);
}

/// Convert any nannou color into the linear RGBA the surface works in.
pub fn color<C: IntoLinSrgba<f32>>(c: C) -> LinSrgba {
    c.into_lin_srgba()
}

/// HSL color with the hue in degrees and saturation/lightness in `[0, 1]`.
pub fn hsl_color(hue_degrees: f32, saturation: f32, lightness: f32, alpha: f32) -> LinSrgba {
    let hue = hue_degrees.rem_euclid(360.0) / 360.0;
    hsla(hue, saturation, lightness, alpha).into_lin_srgba()
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32, color: LinSrgba },
    StrokeRect { x: f32, y: f32, width: f32, height: f32, color: LinSrgba, line_width: f32 },
    FillCircle { center: Vec2, radius: f32, color: LinSrgba },
    StrokeCircle { center: Vec2, radius: f32, color: LinSrgba, line_width: f32 },
    Line { from: Vec2, to: Vec2, color: LinSrgba, line_width: f32 },
    FillPolygon { points: Vec<Vec2>, color: LinSrgba },
}

/// Surface that stores every primitive instead of drawing it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    fill: LinSrgba,
    stroke: LinSrgba,
    line_width: f32,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            fill: LinSrgba::new(0.0, 0.0, 0.0, 1.0),
            stroke: LinSrgba::new(0.0, 0.0, 0.0, 1.0),
            line_width: 1.0,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, matches: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| matches(c)).count()
    }

    pub fn circles(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }

    pub fn lines(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn filled_rects(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::FillRect { .. }))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_fill(&mut self, color: LinSrgba) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: LinSrgba) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color: self.fill });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            color: self.stroke,
            line_width: self.line_width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color: self.fill });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color: self.stroke,
            line_width: self.line_width,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: self.stroke,
            line_width: self.line_width,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::FillPolygon { points: points.to_vec(), color: self.fill });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;

    #[test]
    fn test_recording_keeps_sticky_state() {
        let mut surface = RecordingSurface::new();
        let red = LinSrgba::new(1.0, 0.0, 0.0, 1.0);

        surface.set_stroke(red);
        surface.set_line_width(3.0);
        surface.line(vec2(0.0, 0.0), vec2(10.0, 0.0));
        surface.line(vec2(0.0, 5.0), vec2(10.0, 5.0));

        assert_eq!(surface.lines(), 2);
        for cmd in &surface.commands {
            match cmd {
                DrawCommand::Line { color, line_width, .. } => {
                    assert_eq!(*color, red);
                    assert_eq!(*line_width, 3.0);
                }
                other => panic!("unexpected command {:?}", other),
            }
        }
    }

    #[test]
    fn test_hsl_color_wraps_hue() {
        let a = hsl_color(30.0, 1.0, 0.5, 1.0);
        let b = hsl_color(390.0, 1.0, 0.5, 1.0);
        assert!((a.red - b.red).abs() < 1e-5);
        assert!((a.green - b.green).abs() < 1e-5);
        assert!((a.blue - b.blue).abs() < 1e-5);
    }
}
