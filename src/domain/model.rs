use crate::utils::error::Result;
use crate::utils::paths;
use std::path::{Path, PathBuf};

/// A fully resolved conversion: where to read the markdown and where the
/// HTML lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    /// Normalizes `input` and resolves the output path, deriving the sibling
    /// `.html` file when no explicit output is given.
    pub fn resolve(input: &Path, output: Option<&Path>) -> Result<Self> {
        let input = paths::normalize_input(input)?;
        let output = paths::resolve_output_path(output, &input)?;
        Ok(Self { input, output })
    }

    /// Base name of the input file, for progress messages.
    pub fn input_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

/// Markdown extensions and typographic passes applied while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub tables: bool,
    pub strikethrough: bool,
    /// `# Title {#id}` sets the heading's id attribute.
    pub heading_ids: bool,
    pub definition_lists: bool,
    /// Curly quotes, ellipses, `--` to en dash and `---` to em dash.
    pub smart_punctuation: bool,
    /// `1/2`, `1/4` and `3/4` to their vulgar fraction characters.
    pub smart_fractions: bool,
    /// Render every newline inside a paragraph as `<br />`.
    pub hard_line_breaks: bool,
    /// Bare `http(s)://`, `ftp://`, `file://` and `mailto:` URLs become links.
    pub autolink: bool,
    /// `*` right after a letter or digit never opens emphasis.
    pub no_intra_emphasis: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            heading_ids: true,
            definition_lists: true,
            smart_punctuation: true,
            smart_fractions: true,
            hard_line_breaks: true,
            autolink: true,
            no_intra_emphasis: true,
        }
    }
}
