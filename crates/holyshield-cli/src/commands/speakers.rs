use std::path::Path;

use clap::Args;
use holyshield_core::agenda::{find_speaker, speaker_slug, speakers_by_track, SpeakerRecord};

use super::load_site;

#[derive(Args)]
pub struct SpeakersArgs {
    /// Show one speaker by slug instead of the roster
    slug: Option<String>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SpeakersArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let site = load_site(config)?;

    if let Some(slug) = args.slug.as_deref() {
        let speaker = find_speaker(&site.conference.speakers, slug)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(speaker)?);
        } else {
            print_speaker(speaker);
        }
        return Ok(());
    }

    let roster = speakers_by_track(&site.conference.speakers, &site.grid.track_order);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&roster)?);
        return Ok(());
    }

    for (track, speakers) in &roster {
        println!("{track} ({})", speakers.len());
        for speaker in speakers {
            let topic = speaker.topic.as_deref().unwrap_or("-");
            println!("  {} - {} [{}]", speaker.names().join(", "), topic, speaker_slug(speaker));
        }
    }
    Ok(())
}

fn print_speaker(speaker: &SpeakerRecord) {
    println!("{}", speaker.names().join(", "));
    if let Some(company) = &speaker.company {
        println!("Company: {}", company.as_slice().join(", "));
    }
    if let Some(topic) = &speaker.topic {
        println!("Topic:   {topic}");
    }
    if let (Some(time), Some(track)) = (&speaker.time, &speaker.track) {
        println!("Slot:    {time} [{track}]");
    }
    if let Some(bio) = &speaker.bio {
        println!();
        println!("{bio}");
    }
}
