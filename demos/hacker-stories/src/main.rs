//! Hacker stories demo binary
//!
//! Fetches Hacker News stories for a search term that persists across runs,
//! then removes one story from the list. Pass a search term as the first
//! argument; without one, the last term (or "React" on a first run) is used.

use anyhow::Context;
use listflow_stories::prelude::*;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const STORAGE_FILE: &str = "hacker-stories.json";
const SEARCH_KEY: &str = "search";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hacker_stories=debug,listflow_stories=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Hacker Stories: Listflow Architecture ===\n");

    // The search term survives restarts via write-through storage
    let storage = Arc::new(JsonFileStorage::new(STORAGE_FILE));
    let mut search_term = SemiPersistentValue::new(Arc::clone(&storage), SEARCH_KEY, "React");

    if let Some(term) = std::env::args().nth(1) {
        search_term.set(term);
    }
    println!("Searching for: {}", search_term.get());

    let store = Arc::new(Store::new(
        StoriesState::new(),
        StoriesReducer::new(),
        StoriesEnvironment::new(),
    ));
    let loader = StoriesLoader::new(Arc::clone(&store), HackerNewsGateway::new());

    loader
        .load(search_term.get())
        .await
        .context("loading stories")?;

    let state = store.state(Clone::clone).await;
    if state.is_error {
        println!("\nSomething went wrong fetching stories.");
        return Ok(());
    }

    println!("\nFetched {} stories:", state.len());
    for story in &state.stories {
        println!(
            "  [{:>4} points] {} ({} comments)\n               {}",
            story.points, story.title, story.num_comments, story.url
        );
    }

    // Remove the first story, the one list mutation the state supports
    if let Some(first) = state.stories.first() {
        println!("\n>>> Removing: {}", first.title);
        store
            .send(StoriesAction::RemoveStory {
                id: first.id.clone(),
            })
            .await
            .context("removing story")?;

        let remaining = store.state(StoriesState::len).await;
        println!("{remaining} stories remain");
    }

    println!("\nSearch term saved; the next run reuses \"{}\"", search_term.get());
    Ok(())
}
