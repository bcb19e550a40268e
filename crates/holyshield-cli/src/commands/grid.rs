use std::path::Path;

use clap::Args;
use holyshield_core::agenda::{RowCells, TrackCell};
use holyshield_core::NormalizedSession;

use super::load_site;

#[derive(Args)]
pub struct GridArgs {
    /// Print the grid structure as JSON
    #[arg(long)]
    json: bool,
    /// Print rendered rows (merged/spanned/empty cells) as JSON
    #[arg(long, conflicts_with = "json")]
    cells: bool,
}

fn cell_label(session: &NormalizedSession) -> String {
    let speakers = session.speaker_line();
    if speakers.is_empty() {
        session.title.clone()
    } else {
        format!("{} ({})", session.title, speakers)
    }
}

pub fn run(args: GridArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let site = load_site(config)?;
    let grid = site.schedule_grid();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }
    let rows = grid.render();
    if args.cells {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if !grid.has_announced_sessions() {
        eprintln!("no sessions announced yet");
    }
    println!("TIME  | {}", grid.track_order.join(" | "));
    for row in &rows {
        let line = match &row.cells {
            RowCells::Merged(session) => format!("== {} ==", cell_label(session)),
            RowCells::Tracks(cells) => cells
                .iter()
                .map(|cell| match cell {
                    TrackCell::Session(session) => cell_label(session),
                    TrackCell::Empty => "-".to_string(),
                    TrackCell::Spanned => "^".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" | "),
        };
        println!("{:<5} | {}", row.time, line);
    }
    Ok(())
}
