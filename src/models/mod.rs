pub mod config;

pub use config::{
    AppConfig, ClusteringConfig, InitMethod, OutputConfig, OutputFormat, Overrides,
    PipelineSettings, CONFIG_ENV,
};
