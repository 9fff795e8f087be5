//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`inspect`] - Tile pack metadata and layout
//! - [`nearest`] - Distance to the closest boundary
//! - [`replay`] - Feed a recorded track through the chart engine
//! - [`tile`] - Fetch a single tile

pub mod config;
pub mod inspect;
pub mod nearest;
pub mod replay;
pub mod tile;
