//! Configuration management for the puzzle runner

pub mod settings;

pub use settings::{
    CliOverrides, EncodingConfig, OutputConfig, OutputFormat, SamplingConfig, Settings,
    SolverConfig, SolverPreset, MAX_BIT_WIDTH, MIN_BIT_WIDTH,
};
