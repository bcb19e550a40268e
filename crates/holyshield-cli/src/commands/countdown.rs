use std::path::Path;

use clap::Args;
use holyshield_core::countdown::REFRESH_INTERVAL;
use holyshield_core::Countdown;
use serde_json::json;

use super::load_site;

#[derive(Args)]
pub struct CountdownArgs {
    /// Keep redrawing once per second until the event starts
    #[arg(long)]
    watch: bool,
    /// Stop watching after this many redraws
    #[arg(long, requires = "watch")]
    ticks: Option<u64>,
    /// Print as JSON (single reading)
    #[arg(long, conflicts_with = "watch")]
    json: bool,
}

pub fn run(args: CountdownArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let site = load_site(config)?;
    let countdown = site
        .countdown()?
        .ok_or("site config has no countdown section")?;

    if args.json {
        let parts = countdown.parts_now();
        let reading = json!({
            "label": countdown.label(),
            "target": countdown.target().to_rfc3339(),
            "remaining": parts,
            "display": parts.to_string(),
            "elapsed": parts.is_elapsed(),
        });
        println!("{}", serde_json::to_string_pretty(&reading)?);
        return Ok(());
    }

    if !args.watch {
        println!("{} {}", countdown.label(), countdown.parts_now());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(watch(&countdown, args.ticks));
    Ok(())
}

/// Redraw every [`REFRESH_INTERVAL`] until the target passes or the tick
/// budget runs out.
async fn watch(countdown: &Countdown, ticks: Option<u64>) {
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    let mut drawn = 0u64;

    loop {
        interval.tick().await;
        let parts = countdown.parts_now();
        println!("{} {}", countdown.label(), parts);
        drawn += 1;

        if parts.is_elapsed() {
            tracing::info!("countdown reached its target");
            break;
        }
        if ticks.is_some_and(|limit| drawn >= limit) {
            break;
        }
    }
}
