//! Headless core of a top-down wave shooter.
//!
//! The simulation is a plain struct ([`entities::SimulationState`]) advanced one
//! tick at a time by [`compute::tick`], or through the [`simulation::Simulation`]
//! driver which also owns the RNG and the event observers.

pub mod combat;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod effects;
pub mod entities;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod simulation;
pub mod spawn;
pub mod tuning;
pub mod wave;
