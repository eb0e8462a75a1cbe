//! Unicorn Dash - terminal endless runner.
//!
//! The library holds the whole game so it can be driven headless from
//! tests; the binary only adds the terminal loop.

pub mod build_info;
pub mod cli;
pub mod core;
pub mod game;
pub mod input;
pub mod ui;
pub mod utils;
