pub mod cli;

use crate::domain::model::ConversionJob;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_markdown_extension, validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "md2html")]
#[command(about = "Convert a Markdown document into an HTML file")]
pub struct CliConfig {
    /// Filepath for the markdown file you would like to convert
    #[arg(long)]
    pub input: PathBuf,

    /// Path for your html output (defaults to the input's sibling .html file)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_job(&self) -> Result<ConversionJob> {
        ConversionJob::resolve(&self.input, self.output.as_deref())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // clap already refuses `--input ""`; this covers configs built in code
        if self.input.as_os_str().is_empty() {
            return Err(ConvertError::MissingInput);
        }
        validate_path(&self.input)?;
        validate_markdown_extension(&self.input)?;

        if let Some(output) = &self.output {
            validate_path(output)?;
        }
        Ok(())
    }
}
