pub mod completion;
pub mod config;
pub mod presets;
pub mod simulate;
