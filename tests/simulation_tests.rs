//! Every registered simulation driven headless through the frame driver.

use nannou::prelude::vec2;

use particle_sims::config::AppConfig;
use particle_sims::driver::{DriverOptions, FrameDriver};
use particle_sims::kinematics::CanvasSize;
use particle_sims::params::WalkerModeKind;
use particle_sims::simulation::SimKind;
use particle_sims::surface::{DrawCommand, RecordingSurface};

const SIZE: CanvasSize = CanvasSize { width: 800.0, height: 600.0 };
const FRAME_MS: f64 = 1000.0 / 60.0;

#[test]
fn every_simulation_runs_and_draws() {
    let config = AppConfig::default();

    for kind in SimKind::ALL {
        let mut sim = kind.build(&config, SIZE, 17).unwrap();
        assert_eq!(sim.name(), kind.label());

        let mut driver = FrameDriver::new(DriverOptions { fps: sim.frame_rate(), ..DriverOptions::default() });
        let mut surface = RecordingSurface::new();
        let mut fired = 0;

        for frame in 0..120 {
            if frame == 10 {
                sim.pointer_pressed(vec2(400.0, 50.0), SIZE);
            }
            if frame == 20 {
                sim.pointer_released();
            }
            surface.clear();
            if driver.run_frame(frame as f64 * FRAME_MS, sim.as_mut(), &mut surface, SIZE).unwrap() {
                fired += 1;
                assert!(
                    matches!(surface.commands.first(), Some(DrawCommand::ClearRect { .. })),
                    "{} did not clear before drawing",
                    kind
                );
            }
        }

        assert!(fired > 0, "{} never ticked", kind);
    }
}

#[test]
fn sand_ticks_at_its_own_rate() {
    let config = AppConfig::default();
    let mut sim = SimKind::Sand.build(&config, SIZE, 1).unwrap();
    let mut driver = FrameDriver::new(DriverOptions { fps: sim.frame_rate(), ..DriverOptions::default() });
    let mut surface = RecordingSurface::new();

    // One second of 60 Hz frames at a 10 Hz physics rate.
    let mut fired = 0;
    for frame in 0..=60 {
        if driver.run_frame(frame as f64 * FRAME_MS, sim.as_mut(), &mut surface, SIZE).unwrap() {
            fired += 1;
        }
    }
    assert!((8..=10).contains(&fired), "fired {} times", fired);
}

#[test]
fn clear_and_reset_manage_entities() {
    let config = AppConfig::default();

    let mut flock = SimKind::Flock.build(&config, SIZE, 5).unwrap();
    assert_eq!(flock.entity_count(), config.flock.num_boids);
    flock.clear();
    assert_eq!(flock.entity_count(), 0);
    flock.reset(SIZE);
    assert_eq!(flock.entity_count(), config.flock.num_boids);

    let mut rain = SimKind::Rain.build(&config, SIZE, 5).unwrap();
    rain.clear();
    assert_eq!(rain.entity_count(), 0);
    rain.reset(SIZE);
    assert_eq!(rain.entity_count(), config.rain.num_drops);
}

#[test]
fn configure_picks_up_new_parameters() {
    let mut config = AppConfig::default();
    let mut sim = SimKind::Walkers.build(&config, SIZE, 5).unwrap();

    config.walkers.num_walkers = 3;
    sim.configure(&config, SIZE);
    assert_eq!(sim.entity_count(), 3);

    let mut sand = SimKind::Sand.build(&config, SIZE, 5).unwrap();
    config.sand.physics_fps = 30.0;
    sand.configure(&config, SIZE);
    assert_eq!(sand.frame_rate(), Some(30.0));
}

#[test]
fn quadtree_with_zero_capacity_fails_to_build() {
    let mut config = AppConfig::default();
    config.quadtree.capacity = 0;
    assert!(SimKind::Quadtree.build(&config, SIZE, 1).is_err());
}

#[test]
fn config_file_selects_simulation() {
    let config = AppConfig::from_yaml("simulation: life\nseed: 9\nlife:\n  cell_size: 20.0\n").unwrap();
    assert_eq!(config.simulation, SimKind::Life);
    assert_eq!(config.seed, Some(9));

    let sim = config.simulation.build(&config, SIZE, 9).unwrap();
    assert_eq!(sim.name(), "Game of Life");
}

#[test]
fn minimized_window_skips_ticks_and_resumes() {
    let mut config = AppConfig::default();
    config.walkers.mode = WalkerModeKind::Noise;
    let empty = CanvasSize::new(0.0, 0.0);

    for kind in [SimKind::Walkers, SimKind::Quadtree] {
        let mut sim = kind.build(&config, SIZE, 3).unwrap();
        let mut driver = FrameDriver::default();
        let mut surface = RecordingSurface::new();

        assert!(driver.run_frame(0.0, sim.as_mut(), &mut surface, SIZE).is_ok());
        assert!(driver.run_frame(FRAME_MS, sim.as_mut(), &mut surface, SIZE).unwrap());

        for frame in 2..30 {
            let fired = driver.run_frame(frame as f64 * FRAME_MS, sim.as_mut(), &mut surface, empty);
            assert!(!fired.unwrap(), "{} ticked on an empty canvas", kind);
        }

        let before = driver.fired();
        for frame in 30..40 {
            assert!(driver.run_frame(frame as f64 * FRAME_MS, sim.as_mut(), &mut surface, SIZE).unwrap());
        }
        assert_eq!(driver.fired(), before + 10);
        assert!(driver.is_running());
    }
}
