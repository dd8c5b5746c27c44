/*
 * UI Module
 *
 * The egui control panel: simulation selector, parameter sliders for the
 * active simulation, shell controls and the on-canvas debug overlay.
 * Parameter change detection goes through `ParamTracker` so simulations are
 * only reconfigured when something actually moved.
 */

use nannou_egui::{egui, Egui};

use crate::config::AppConfig;
use crate::debug::DebugInfo;
use crate::kinematics::EdgePolicy;
use crate::params::{
    AttractionParams, FlockParams, LifeParams, ParamTracker, QuadtreeParams, RainParams, SandParams,
    ShellParams, WalkerModeKind, WalkerParams,
};
use crate::simulation::SimKind;

/// What the user asked for this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiActions {
    pub switch_to: Option<SimKind>,
    pub config_changed: bool,
    pub clear: bool,
    pub reset: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    config: &mut AppConfig,
    shell: &mut ShellParams,
    tracker: &mut ParamTracker<AppConfig>,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();
    let mut selected = config.simulation;

    // Take a snapshot of current parameter values for change detection
    tracker.take_snapshot(config);

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            egui::ComboBox::from_label("Simulation")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for kind in SimKind::ALL {
                        ui.selectable_value(&mut selected, kind, kind.label());
                    }
                });

            ui.collapsing("Parameters", |ui| match config.simulation {
                SimKind::Attraction => attraction_controls(ui, &mut config.attraction),
                SimKind::Flock => flock_controls(ui, &mut config.flock),
                SimKind::Sand => sand_controls(ui, &mut config.sand),
                SimKind::Rain => rain_controls(ui, &mut config.rain),
                SimKind::Walkers => walker_controls(ui, &mut config.walkers),
                SimKind::Life => life_controls(ui, &mut config.life),
                SimKind::Quadtree => quadtree_controls(ui, &mut config.quadtree),
            });

            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    actions.clear = true;
                }
                if ui.button("Reset").clicked() {
                    actions.reset = true;
                }
            });

            ui.separator();
            ui.label(format!("Entities: {}", debug_info.entity_count));
            ui.checkbox(&mut shell.show_debug, "Show Debug Info");
            ui.checkbox(&mut shell.pause_simulation, "Pause Simulation");
        });

    if selected != config.simulation {
        actions.switch_to = Some(selected);
    } else {
        actions.config_changed = tracker.detect_changes(config);
    }

    actions
}

fn attraction_controls(ui: &mut egui::Ui, params: &mut AttractionParams) {
    ui.add(egui::Slider::new(&mut params.speed, AttractionParams::speed_range()).text("Launch Speed"));
    ui.add(egui::Slider::new(&mut params.radius, AttractionParams::radius_range()).text("Radius"));
    ui.add(
        egui::Slider::new(&mut params.strength, AttractionParams::strength_range())
            .logarithmic(true)
            .text("Strength"),
    );
    ui.label("Click to add a circle");
}

fn flock_controls(ui: &mut egui::Ui, params: &mut FlockParams) {
    ui.add(egui::Slider::new(&mut params.num_boids, FlockParams::num_boids_range()).text("Number of Boids"));
    ui.add(egui::Slider::new(&mut params.max_speed, FlockParams::max_speed_range()).text("Max Speed"));
    ui.add(egui::Slider::new(&mut params.max_force, FlockParams::max_force_range()).text("Max Force"));
    ui.add(egui::Slider::new(&mut params.perception, FlockParams::radius_range()).text("Perception"));
    ui.add(egui::Slider::new(&mut params.separation_weight, FlockParams::weight_range()).text("Separation Weight"));
    ui.add(egui::Slider::new(&mut params.alignment_weight, FlockParams::weight_range()).text("Alignment Weight"));
    ui.add(egui::Slider::new(&mut params.cohesion_weight, FlockParams::weight_range()).text("Cohesion Weight"));
    ui.checkbox(&mut params.show_perception, "Show Perception");
}

fn sand_controls(ui: &mut egui::Ui, params: &mut SandParams) {
    ui.add(egui::Slider::new(&mut params.cell_size, SandParams::cell_size_range()).text("Cell Size"));
    ui.add(egui::Slider::new(&mut params.physics_fps, SandParams::physics_fps_range()).text("Physics FPS"));
    ui.add(egui::Slider::new(&mut params.hue_rate, SandParams::hue_rate_range()).text("Hue Rate"));
    ui.label("Hold the mouse button to pour");
}

fn rain_controls(ui: &mut egui::Ui, params: &mut RainParams) {
    ui.add(egui::Slider::new(&mut params.num_drops, RainParams::num_drops_range()).text("Drops"));
    ui.add(egui::Slider::new(&mut params.gravity, RainParams::gravity_range()).text("Gravity"));
}

fn walker_controls(ui: &mut egui::Ui, params: &mut WalkerParams) {
    ui.add(egui::Slider::new(&mut params.num_walkers, WalkerParams::num_walkers_range()).text("Walkers"));
    ui.add(egui::Slider::new(&mut params.speed, WalkerParams::speed_range()).text("Speed"));

    ui.horizontal(|ui| {
        ui.radio_value(&mut params.mode, WalkerModeKind::Linear, "Linear");
        ui.radio_value(&mut params.mode, WalkerModeKind::Sine, "Sine");
        ui.radio_value(&mut params.mode, WalkerModeKind::Noise, "Noise");
    });
    if params.mode == WalkerModeKind::Noise {
        ui.add(egui::Slider::new(&mut params.noise_max_turn_rate, WalkerParams::turn_rate_range()).text("Max Turn (deg/s)"));
    }

    ui.horizontal(|ui| {
        ui.radio_value(&mut params.edges, EdgePolicy::Wrap, "Wrap");
        ui.radio_value(&mut params.edges, EdgePolicy::Bounce, "Bounce");
    });

    ui.checkbox(&mut params.show_tail, "Show Tail");
    ui.add(egui::Slider::new(&mut params.tail_length, WalkerParams::tail_length_range()).text("Tail Length"));
}

fn life_controls(ui: &mut egui::Ui, params: &mut LifeParams) {
    ui.add(egui::Slider::new(&mut params.cell_size, LifeParams::cell_size_range()).text("Cell Size"));
    ui.add(egui::Slider::new(&mut params.interval_ms, LifeParams::interval_range()).text("Interval (ms)"));
    ui.add(egui::Slider::new(&mut params.density, 0.0..=1.0).text("Seed Density"));
    ui.checkbox(&mut params.playing, "Playing");
}

fn quadtree_controls(ui: &mut egui::Ui, params: &mut QuadtreeParams) {
    ui.add(egui::Slider::new(&mut params.capacity, QuadtreeParams::capacity_range()).text("Capacity"));
    ui.add(egui::Slider::new(&mut params.query_width, QuadtreeParams::query_size_range()).text("Query Width"));
    ui.add(egui::Slider::new(&mut params.query_height, QuadtreeParams::query_size_range()).text("Query Height"));
    ui.checkbox(&mut params.show_boundaries, "Show Boundaries");
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let lines = debug_info.lines();

    // Background panel in the bottom-left corner, clear of the controls
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 240.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x + panel_width / 2.0 - margin, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
