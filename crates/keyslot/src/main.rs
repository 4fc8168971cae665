//! keyslot HTTP service

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = keyslot::cli::parse();
    keyslot::telemetry::init_tracing(cli.tracing_config())?;
    keyslot::run(cli).await?;
    Ok(())
}
