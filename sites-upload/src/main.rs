use anyhow::Result;
use clap::Parser;
use sites_upload::cli::{run, Cli};
use sites_upload_core::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is kept for user-facing progress.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("CLI application startup: tracing initialised");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(report) => {
            println!(
                "Uploaded {} files ({} bytes) to {}",
                report.file_count(),
                report.bytes,
                report.site
            );
            Ok(())
        }
        Err(e) if matches!(e.downcast_ref::<Error>(), Some(Error::MissingCredentials)) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "CLI exited with error");
            Err(e)
        }
    }
}
