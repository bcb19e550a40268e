use std::path::Path;

use clap::Args;
use holyshield_core::agenda::announced_sessions;

use super::load_site;

#[derive(Args)]
pub struct AgendaArgs {
    /// Only sessions with announced content
    #[arg(long)]
    announced: bool,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: AgendaArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let site = load_site(config)?;
    let sessions = site.sessions();
    let listed: Vec<_> = if args.announced {
        announced_sessions(&sessions)
    } else {
        sessions.iter().collect()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    for session in listed {
        let speakers = session.speaker_line();
        let marker = if session.placeholder { " (placeholder)" } else { "" };
        if speakers.is_empty() {
            println!("{} [{}] {}{}", session.time, session.track, session.title, marker);
        } else {
            println!(
                "{} [{}] {} - {}{}",
                session.time, session.track, session.title, speakers, marker
            );
        }
        println!("      /conference/sessions/{}", session.slug);
    }
    Ok(())
}
