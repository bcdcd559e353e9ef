pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, CliConfig};
pub use crate::core::{convert::Converter, render::MarkdownRenderer};
pub use crate::domain::model::{ConversionJob, ConversionReport, RenderOptions};
pub use crate::utils::error::{ConvertError, Result};
