/*
 * Particle Simulations - Module Definitions
 *
 * The simulation core (vectors, kinematics, grids, the quadtree and the
 * frame driver) is independent of the window. `app`, `renderer`, `ui` and
 * `input` host it in a nannou window with an egui control panel.
 */

// Re-export key components for easier access
pub use config::AppConfig;
pub use driver::{DriverOptions, DriverState, FrameDriver};
pub use error::{SimError, SimResult};
pub use kinematics::{CanvasSize, EdgePolicy};
pub use simulation::{SimKind, Simulation};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use vector::{Vector2D, VectorExt};

// Core
pub mod error;
pub mod math;
pub mod vector;
pub mod kinematics;
pub mod surface;
pub mod driver;
pub mod params;
pub mod config;
pub mod logging;

// Entities and grids
pub mod circle;
pub mod boid;
pub mod flock;
pub mod raindrop;
pub mod walker;
pub mod sand;
pub mod life;
pub mod quadtree;

// Simulations
pub mod simulation;
pub mod sims;

// Window host
pub mod app;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
