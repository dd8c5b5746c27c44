/*
 * Input Module
 *
 * Forwards pointer events to the active simulation in canvas coordinates.
 * Events over the control panel belong to egui and are not forwarded, except
 * releases, so a drag that ends over the panel still lets go.
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;
use crate::renderer::{canvas_size, to_canvas};

fn pointer_over_ui(model: &Model) -> bool {
    model.egui.ctx().is_pointer_over_area()
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    if pointer_over_ui(model) {
        return;
    }
    let rect = app.window_rect();
    model.sim.pointer_moved(to_canvas(rect, pos), canvas_size(rect));
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || pointer_over_ui(model) {
        return;
    }
    let rect = app.window_rect();
    let position = to_canvas(rect, app.mouse.position());
    model.sim.pointer_pressed(position, canvas_size(rect));
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.sim.pointer_released();
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
