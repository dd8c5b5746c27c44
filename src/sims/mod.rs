/*
 * Simulations
 *
 * One module per selectable simulation. Each type implements `Simulation`
 * and owns its entities.
 */

pub mod attraction;
pub mod falling_sand;
pub mod flocking;
pub mod game_of_life;
pub mod quadtree_demo;
pub mod rain;
pub mod walkers;

pub use attraction::AttractionSim;
pub use falling_sand::FallingSandSim;
pub use flocking::FlockingSim;
pub use game_of_life::GameOfLifeSim;
pub use quadtree_demo::QuadtreeDemo;
pub use rain::RainSim;
pub use walkers::WalkersSim;
