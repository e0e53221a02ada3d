//! Interactive companion to the backend: asks for a query and prints the
//! top music videos ranked by view count.

use anyhow::{bail, Context, Result};
use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::{self, BufRead, Write};

use toptracks_backend::services::youtube::{fetch_top_videos, YouTubeClient, DEFAULT_MAX_RESULTS};

fn read_query() -> Result<String> {
    if let Some(query) = env::args().nth(1) {
        return Ok(query);
    }

    print!("What do you want to search for?  ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    Builder::new().filter_level(LevelFilter::Warn).init();

    let api_key =
        env::var("YOUTUBE_API_KEY").context("YOUTUBE_API_KEY not set. Check your .env file.")?;

    let query = read_query()?;
    if query.is_empty() {
        bail!("No search query provided.");
    }

    let client = YouTubeClient::new(api_key)?;

    println!("Searching for videos related to: '{query}'...");
    let videos = fetch_top_videos(&client, &query, DEFAULT_MAX_RESULTS)
        .await
        .context("Error fetching data from YouTube")?;

    if videos.is_empty() {
        println!("No video results found.");
        return Ok(());
    }

    println!(
        "\n--- Top {} Songs for '{query}' (Sorted by Views) ---\n",
        videos.len()
    );
    for (rank, video) in videos.iter().enumerate() {
        println!(
            "{:3}. {}\n     Views: {} | URL: {}\n",
            rank + 1,
            video.title,
            video.views_formatted,
            video.url
        );
    }

    Ok(())
}
