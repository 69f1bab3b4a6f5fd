//! Service health check.

use wishlist_console::{Console, HttpTransport};

use crate::CliError;

/// Call `GET /health` and print the service's answer.
#[allow(clippy::print_stdout)]
pub async fn run(console: &Console<HttpTransport>) -> Result<(), CliError> {
    let report = console.health().await?;
    tracing::info!(status = report.status, "Service is healthy");
    println!("{} ({})", report.message, report.status);
    Ok(())
}
