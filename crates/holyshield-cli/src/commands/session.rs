use std::path::Path;

use clap::Args;

use super::load_site;

#[derive(Args)]
pub struct SessionArgs {
    /// Session slug, as printed by `agenda`
    slug: String,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SessionArgs, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let site = load_site(config)?;
    let detail = site.session_detail(&args.slug)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("{}", detail.title);
    println!("{} [{}] {} min", detail.time, detail.track, detail.duration_minutes);
    for presenter in &detail.presenters {
        match presenter.company.as_deref().or(presenter.title.as_deref()) {
            Some(affiliation) => println!("  {} ({})", presenter.name, affiliation),
            None => println!("  {}", presenter.name),
        }
    }
    if let Some(bio) = &detail.bio {
        println!();
        println!("{bio}");
    }
    if !detail.paragraphs.is_empty() {
        println!();
        for paragraph in &detail.paragraphs {
            println!("{paragraph}");
        }
    }
    Ok(())
}
