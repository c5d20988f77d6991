//! # Meteor Madness
//!
//! A meteor impact simulator built on `meteor_engine`.
//!
//! Meteors fall across a map, burst into explosion particles when they reach
//! the ground, and leave permanent impact records that feed a heatmap with a
//! grid-bucketed "future risk" overlay. A control surface starts, pauses and
//! resets the simulation. Asteroid data from a remote API drives a retained
//! 3D globe scene and text cards.

#![warn(missing_docs)]

pub mod config;
pub mod components;
pub mod simulation;
pub mod spawner;
pub mod heatmap;
pub mod controls;
pub mod painter;
pub mod globe;
pub mod api;
pub mod cards;
pub mod app;

pub use app::{MeteorMadnessApp, ScheduledAction};
pub use config::MeteorConfig;
pub use controls::{ControlAction, ControlSurface};
pub use simulation::{Simulation, SimulationStats};
