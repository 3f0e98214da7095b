//! Grid-based Snake: simulation core, session loop, and terminal front end.

pub mod assets;
pub mod audio;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
