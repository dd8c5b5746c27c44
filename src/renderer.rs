/*
 * Renderer Module
 *
 * Draws the active simulation through nannou. Simulations work in canvas
 * coordinates (origin top-left, y down); nannou's window space has its origin
 * at the center with y up, so every primitive is converted on the way out.
 */

use log::error;
use nannou::color::LinSrgba;
use nannou::prelude::*;

use crate::app::Model;
use crate::kinematics::CanvasSize;
use crate::surface::Surface;
use crate::ui;

pub fn canvas_size(rect: Rect) -> CanvasSize {
    CanvasSize::new(rect.w(), rect.h())
}

/// Canvas point to window point.
pub fn to_window(rect: Rect, point: Vec2) -> Vec2 {
    vec2(rect.left() + point.x, rect.top() - point.y)
}

/// Window point to canvas point.
pub fn to_canvas(rect: Rect, point: Vec2) -> Vec2 {
    vec2(point.x - rect.left(), rect.top() - point.y)
}

/// `Surface` backed by a nannou `Draw`.
pub struct NannouSurface<'a> {
    draw: &'a Draw,
    rect: Rect,
    fill: LinSrgba,
    stroke: LinSrgba,
    line_width: f32,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, rect: Rect) -> Self {
        Self {
            draw,
            rect,
            fill: LinSrgba::new(1.0, 1.0, 1.0, 1.0),
            stroke: LinSrgba::new(1.0, 1.0, 1.0, 1.0),
            line_width: 1.0,
        }
    }

    // Center of a canvas rectangle in window space.
    fn rect_center(&self, x: f32, y: f32, width: f32, height: f32) -> Vec2 {
        to_window(self.rect, vec2(x + width / 2.0, y + height / 2.0))
    }
}

impl Surface for NannouSurface<'_> {
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
        self.draw
            .rect()
            .xy(self.rect_center(x, y, width, height))
            .w_h(width, height)
            .color(BLACK);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.draw
            .rect()
            .xy(self.rect_center(x, y, width, height))
            .w_h(width, height)
            .color(self.fill);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.draw
            .rect()
            .xy(self.rect_center(x, y, width, height))
            .w_h(width, height)
            .no_fill()
            .stroke_weight(self.line_width)
            .stroke(self.stroke);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.draw
            .ellipse()
            .xy(to_window(self.rect, center))
            .radius(radius)
            .color(self.fill);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.draw
            .ellipse()
            .xy(to_window(self.rect, center))
            .radius(radius)
            .no_fill()
            .stroke(self.stroke)
            .stroke_weight(self.line_width);
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.draw
            .line()
            .start(to_window(self.rect, from))
            .end(to_window(self.rect, to))
            .weight(self.line_width)
            .color(self.stroke);
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        let rect = self.rect;
        self.draw
            .polygon()
            .color(self.fill)
            .points(points.iter().map(|&p| to_window(rect, p)));
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let rect = app.window_rect();
    let mut surface = NannouSurface::new(&draw, rect);
    model.sim.draw(&mut surface, canvas_size(rect));

    if model.shell.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, rect);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!("failed to render frame: {:?}", e);
    }

    // Draw the egui UI
    if let Err(e) = model.egui.draw_to_frame(&frame) {
        error!("failed to render controls: {:?}", e);
    }
}
