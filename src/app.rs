/*
 * Application Module
 *
 * The nannou application model and its update loop. The model owns exactly
 * one active simulation; switching simulations drops the old one and builds
 * the new one from the current configuration.
 *
 * Each update:
 * - runs the control panel and applies what it asked for
 * - keeps the frame driver's run state in sync with the pause checkbox
 * - advances the driver and, when it fires, steps the simulation
 */

use std::sync::OnceLock;

use anyhow::Result;
use log::{error, info};
use nannou::prelude::*;
use nannou_egui::Egui;

use crate::config::AppConfig;
use crate::debug::DebugInfo;
use crate::driver::{DriverOptions, FrameDriver};
use crate::input::{mouse_moved, mouse_pressed, mouse_released, raw_window_event};
use crate::kinematics::CanvasSize;
use crate::params::{ParamTracker, ShellParams};
use crate::renderer::{canvas_size, view};
use crate::simulation::{SimKind, Simulation};
use crate::sims::FlockingSim;
use crate::ui;

// nannou's model function takes no arguments, so the launch configuration is
// parked here by `run`.
static LAUNCH_CONFIG: OnceLock<AppConfig> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub config: AppConfig,
    pub sim: Box<dyn Simulation>,
    pub driver: FrameDriver,
    pub egui: Egui,
    pub shell: ShellParams,
    pub debug_info: DebugInfo,
    pub seed: u64,
    tracker: ParamTracker<AppConfig>,
}

/// Open the window and run until it is closed.
pub fn run(config: AppConfig) -> Result<()> {
    if LAUNCH_CONFIG.set(config).is_err() {
        anyhow::bail!("the application is already running");
    }
    nannou::app(model).update(update).run();
    Ok(())
}

/// Build `kind`, falling back to the flocking simulation if it cannot be
/// built for this canvas.
pub fn build_simulation(
    kind: SimKind,
    config: &AppConfig,
    size: CanvasSize,
    seed: u64,
) -> (SimKind, Box<dyn Simulation>) {
    match kind.build(config, size, seed) {
        Ok(sim) => (kind, sim),
        Err(e) => {
            error!("unable to start {}: {}", kind, e);
            (SimKind::Flock, Box::new(FlockingSim::new(config.flock.clone(), size, seed)))
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let mut config = LAUNCH_CONFIG.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title(window_title(config.simulation))
        .size(config.window.width, config.window.height)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the main window");

    let window = app.window(window_id).expect("main window closed during startup");
    let egui = Egui::from_window(&window);

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting {} with seed {}", config.simulation, seed);

    let size = canvas_size(window.rect());
    let (kind, sim) = build_simulation(config.simulation, &config, size, seed);
    config.simulation = kind;
    window.set_title(&window_title(kind));

    let driver = FrameDriver::new(DriverOptions {
        fps: sim.frame_rate(),
        ..DriverOptions::default()
    });

    Model {
        config,
        sim,
        driver,
        egui,
        shell: ShellParams::default(),
        debug_info: DebugInfo::default(),
        seed,
        tracker: ParamTracker::new(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.record_frame(app.fps(), update.since_last);
    let size = canvas_size(app.window_rect());

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.config,
        &mut model.shell,
        &mut model.tracker,
        &model.debug_info,
    );

    if let Some(kind) = actions.switch_to {
        switch_simulation(model, kind, size);
        app.main_window().set_title(&window_title(model.config.simulation));
    } else if actions.config_changed {
        model.sim.configure(&model.config, size);
        model.driver.set_fps(model.sim.frame_rate());
    }
    if actions.clear {
        model.sim.clear();
    }
    if actions.reset {
        model.sim.reset(size);
    }

    sync_pause(model);

    let timestamp_ms = update.since_start.as_secs_f64() * 1000.0;
    // A minimized window is skipped inside `step`; only real failures pause.
    if let Err(e) = model.driver.step(timestamp_ms, model.sim.as_mut(), size) {
        error!("{} update failed: {}", model.sim.name(), e);
        model.debug_info.last_error = Some(e.to_string());
        model.shell.pause_simulation = true;
        sync_pause(model);
    }

    model.debug_info.sim_name = model.sim.name();
    model.debug_info.entity_count = model.sim.entity_count();
    model.debug_info.ticks_fired = model.driver.fired();
}

fn window_title(kind: SimKind) -> String {
    format!("{} - Particle Simulations", kind)
}

fn switch_simulation(model: &mut Model, kind: SimKind, size: CanvasSize) {
    let (kind, sim) = build_simulation(kind, &model.config, size, model.seed);
    info!("switched to {}", kind);

    model.config.simulation = kind;
    model.sim = sim;
    model.debug_info.last_error = None;
    model.driver.set_fps(model.sim.frame_rate());
    if model.driver.is_running() {
        // Restart for a fresh baseline; the first tick of the new
        // simulation must not carry time measured against the old one.
        model.driver.stop();
        model.driver.start();
    }
}

fn sync_pause(model: &mut Model) {
    match (model.shell.pause_simulation, model.driver.is_running()) {
        (true, true) => {
            model.driver.stop();
            info!("simulation paused");
        }
        (false, false) => {
            model.driver.start();
            model.debug_info.last_error = None;
            info!("simulation resumed");
        }
        _ => {}
    }
}
