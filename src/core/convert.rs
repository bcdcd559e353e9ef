use crate::core::{ConversionJob, ConversionReport, Renderer, Storage};
use crate::utils::error::Result;

pub struct Converter<S: Storage, R: Renderer> {
    storage: S,
    renderer: R,
}

impl<S: Storage, R: Renderer> Converter<S, R> {
    pub fn new(storage: S, renderer: R) -> Self {
        Self { storage, renderer }
    }

    /// Reads the markdown, renders it and writes the HTML. Nothing is
    /// written when the read fails.
    pub fn run(&self, job: &ConversionJob) -> Result<ConversionReport> {
        self.run_with(job, |_| {})
    }

    /// Like [`Converter::run`], calling `on_rendered` once the HTML is ready
    /// and before it is written.
    pub fn run_with<F>(&self, job: &ConversionJob, on_rendered: F) -> Result<ConversionReport>
    where
        F: FnOnce(&ConversionJob),
    {
        tracing::debug!("Reading markdown from {}", job.input.display());
        let raw_markdown = self.storage.read_file(&job.input)?;
        tracing::debug!("Read {} bytes", raw_markdown.len());

        let markdown = String::from_utf8_lossy(&raw_markdown);
        if let std::borrow::Cow::Owned(_) = markdown {
            tracing::warn!(
                "{} is not valid UTF-8, invalid sequences were replaced",
                job.input.display()
            );
        }

        let html_body = self.renderer.render(&markdown);
        tracing::debug!("Rendered {} bytes of HTML", html_body.len());

        on_rendered(job);

        self.storage.write_file(&job.output, html_body.as_bytes())?;
        tracing::info!("Wrote {}", job.output.display());

        Ok(ConversionReport {
            input: job.input.clone(),
            output: job.output.clone(),
            bytes_read: raw_markdown.len(),
            bytes_written: html_body.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::MarkdownRenderer;
    use crate::utils::error::ConvertError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(PathBuf::from(path), data.to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| ConvertError::ReadError {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::NotFound, "not found"),
                })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    struct EchoRenderer;

    impl Renderer for EchoRenderer {
        fn render(&self, markdown: &str) -> String {
            format!("<pre>{}</pre>", markdown)
        }
    }

    fn job(input: &str, output: &str) -> ConversionJob {
        ConversionJob {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }
    }

    #[test]
    fn test_run_writes_rendered_output() {
        let storage = MockStorage::with_file("/docs/a.md", b"# Title\n");
        let converter = Converter::new(storage, MarkdownRenderer::default());

        let report = converter.run(&job("/docs/a.md", "/docs/a.html")).unwrap();
        assert_eq!(report.bytes_read, 8);
        assert_eq!(report.output, PathBuf::from("/docs/a.html"));

        let html = converter.storage.get_file("/docs/a.html").unwrap();
        assert_eq!(String::from_utf8(html).unwrap(), "<h1>Title</h1>\n");
        assert_eq!(report.bytes_written, "<h1>Title</h1>\n".len());
    }

    #[test]
    fn test_run_missing_input_writes_nothing() {
        let converter = Converter::new(MockStorage::default(), EchoRenderer);

        let result = converter.run(&job("/docs/missing.md", "/docs/missing.html"));
        assert!(matches!(result, Err(ConvertError::ReadError { .. })));
        assert!(converter.storage.get_file("/docs/missing.html").is_none());
    }

    #[test]
    fn test_run_with_calls_back_before_writing() {
        let storage = MockStorage::with_file("/a.md", b"text");
        let converter = Converter::new(storage, EchoRenderer);

        let mut seen = None;
        converter
            .run_with(&job("/a.md", "/a.html"), |job| {
                seen = Some(job.output.clone());
                assert!(converter.storage.get_file("/a.html").is_none());
            })
            .unwrap();
        assert_eq!(seen, Some(PathBuf::from("/a.html")));
        assert!(converter.storage.get_file("/a.html").is_some());
    }

    #[test]
    fn test_run_with_skips_callback_when_read_fails() {
        let converter = Converter::new(MockStorage::default(), EchoRenderer);

        let mut called = false;
        let result = converter.run_with(&job("/missing.md", "/missing.html"), |_| called = true);
        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn test_run_replaces_invalid_utf8() {
        let storage = MockStorage::with_file("/a.md", b"caf\xe9");
        let converter = Converter::new(storage, EchoRenderer);

        converter.run(&job("/a.md", "/a.html")).unwrap();
        let html = converter.storage.get_file("/a.html").unwrap();
        assert_eq!(String::from_utf8(html).unwrap(), "<pre>caf\u{FFFD}</pre>");
    }
}
