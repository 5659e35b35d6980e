pub mod cli;
pub mod config;
pub mod controller;
pub mod directory;
pub mod export;
pub mod handoff;
pub mod lifecycle;
pub mod logging;
pub mod roles;
pub mod ui;
