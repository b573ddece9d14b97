//! Deterministic state-transition core for grid Snake.
//!
//! [`game::init`] builds a board from a [`config::Config`], [`game::update`]
//! is the only way to advance it, and [`validate::validate`] checks the
//! structural invariants of any board. Everything else (the driver session,
//! leaderboard persistence, input mapping and terminal rendering) sits
//! around that core and never mutates a [`model::Model`].

pub mod collision;
pub mod config;
pub mod driver;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod model;
pub mod position;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod validate;
