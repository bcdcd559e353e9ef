pub mod convert;
pub mod render;

pub use crate::domain::model::{ConversionJob, ConversionReport, RenderOptions};
pub use crate::domain::ports::{Renderer, Storage};
pub use crate::utils::error::Result;
