mod cli;
mod infra;
mod report;
mod routes;
mod server;

use recruit_dash::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
