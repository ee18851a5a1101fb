// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Run the detection, print the result, persist the players
// 4. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: Because the detection suspends at every page fetch
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod detect;        // src/detect/ - the BFS detection engine
mod roster;        // src/roster/ - server roster extraction
mod steam;         // src/steam/ - page fetching + profile extraction
mod store;         // src/store.rs - saved player persistence

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser;  // Parser trait enables the parse() method
use std::path::Path;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

use detect::DetectionResult;
use store::{PlayerStore, SavedPlayer};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an error occurred, print it (with its cause chain) and
            // exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = run completed
//   Err = fatal error (roster/seed fetch, bad store file, ...)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Scan {
            profile_url,
            server_url,
            json,
            store,
        } => handle_scan(&profile_url, &server_url, json, &store).await,
        Commands::Saved { json, store } => handle_saved(json, &store),
    }
}

// Handles the 'scan' subcommand
// Parameters:
//   profile_url: the seed player's Steam profile URL
//   server_url: the Battlemetrics server page URL
//   json: whether to output JSON format
//   store_path: where to save the discovered players
async fn handle_scan(
    profile_url: &str,
    server_url: &str,
    json: bool,
    store_path: &Path,
) -> Result<i32> {
    println!("🔍 Scanning server roster: {}", server_url);
    println!("🧑 Seed profile: {}", profile_url);

    // The real page source; tests drive the engine with a fake instead
    let source = steam::HttpPageSource::new()?;

    // Run the breadth-first detection
    let result = detect::detect(&source, profile_url, server_url).await?;

    // Print results in the requested format
    print_result(&result, json)?;

    // Persist the discovered players, once per successful run. The saved
    // list can seed a future scan via the 'saved' subcommand.
    let saved: Vec<SavedPlayer> = result
        .friends
        .iter()
        .map(|player| SavedPlayer {
            nickname: player.nickname.clone(),
            steam_id: player.steam_id.clone(),
        })
        .collect();
    PlayerStore::new(store_path).save(&saved)?;
    println!("💾 Saved {} player(s) to {}", saved.len(), store_path.display());

    Ok(0)
}

// Handles the 'saved' subcommand
fn handle_saved(json: bool, store_path: &Path) -> Result<i32> {
    let players = PlayerStore::new(store_path).load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&players)?);
        return Ok(0);
    }

    if players.is_empty() {
        println!("No saved players in {}", store_path.display());
        return Ok(0);
    }

    println!("{:<30} {:<20}", "NAME", "STEAMID");
    println!("{}", "=".repeat(50));
    for player in &players {
        println!("{:<30} {:<20}", player.nickname, player.steam_id);
    }

    Ok(0)
}

// Prints the detection result either as tables or JSON
fn print_result(result: &DetectionResult, json: bool) -> Result<()> {
    if json {
        // Serialize the whole result to JSON and print
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
    } else {
        // Print human-readable tables
        print_tables(result);
    }
    Ok(())
}

// Prints the result as human-readable tables in the terminal
fn print_tables(result: &DetectionResult) {
    println!("\n👥 Connected players:");
    println!("{:<30} {:<20} {:<50}", "NAME", "STEAMID", "PROFILE");
    println!("{}", "=".repeat(100));

    for player in &result.friends {
        println!(
            "{:<30} {:<20} {:<50}",
            player.nickname,
            player.steam_id,
            steam::profile_url(&player.steam_id)
        );
    }

    if !result.edges.is_empty() {
        println!("\n🔗 Friendship edges:");
        for edge in &result.edges {
            println!("   {} -> {}", edge.from, edge.to);
        }
    }

    // Print summary
    println!("\n📊 Summary:");
    println!("   🎮 Players on roster: {}", result.roster.len());
    println!("   👥 Connected players found: {}", result.friends.len());
    println!("   🔗 Edges recorded: {}", result.edges.len());
}
