// Public module exports for binary crates
pub mod cli;
pub mod delimiter;
pub mod error;
pub mod export;
pub mod logging;
pub mod render;
pub mod rows;
pub mod session;
pub mod viewer;

#[cfg(feature = "gui")]
pub mod gui;
