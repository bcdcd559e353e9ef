use clap::Parser;
use md2html::utils::{logger, validation::Validate};
use md2html::{CliConfig, ConvertError, Converter, LocalStorage, MarkdownRenderer};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", e);
    }

    let job = match config.to_job() {
        Ok(job) => job,
        Err(e) => fail("Could not resolve paths", e),
    };
    tracing::debug!(
        "Input: {}, output: {}",
        job.input.display(),
        job.output.display()
    );

    let converter = Converter::new(LocalStorage::new(), MarkdownRenderer::default());

    let result = converter.run_with(&job, |job| {
        println!(
            "Converting {}. Output is located at {}",
            job.input_name(),
            job.output.display()
        );
    });

    match result {
        Ok(report) => {
            tracing::info!(
                "Converted {} bytes of markdown into {} bytes of HTML",
                report.bytes_read,
                report.bytes_written
            );
            println!(
                "Done: wrote {} bytes to {}",
                report.bytes_written,
                report.output.display()
            );
        }
        Err(e) => fail("Conversion failed", e),
    }
}

fn fail(context: &str, e: ConvertError) -> ! {
    tracing::error!("{}: {} (Category: {:?})", context, e, e.category());
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
