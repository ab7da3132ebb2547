mod bot;
mod card;
mod telemetry;

use std::error::Error;

use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; variables may come from the environment.
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => return Err(e.into()),
        _ => {}
    }
    telemetry::init()?;

    let cfg = bot::BotConfig::from_env()?;
    if let Err(e) = bot::run(&cfg).await {
        error!(error = %e, "run aborted, nothing published");
        return Err(e.into());
    }
    Ok(())
}
