use reporter::{current_reading, get_config_info, load_forecast_xml, parse_dwml, setup_logger};
use slog::{debug, info};
use time::OffsetDateTime;

// single fetch per run
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let cli = get_config_info()?;
    let logger = setup_logger(&cli);
    info!(logger, "requesting forecast for zip code: {}", cli.zip_code());

    let raw_xml = load_forecast_xml(&logger, &cli).await?;
    debug!(logger, "raw xml length: {}", raw_xml.len());
    let forecast = parse_dwml(&raw_xml)?;

    let reading = current_reading(&logger, &forecast, OffsetDateTime::now_utc())?;
    println!("{}", serde_json::to_string(&reading)?);
    Ok(())
}
