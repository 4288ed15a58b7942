pub mod cli;
pub mod color;
pub mod config;
pub mod matugen;
pub mod pipeline;
pub mod preview;
pub mod theme;
