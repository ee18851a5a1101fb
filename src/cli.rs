// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "squad-radar",
    version = "0.1.0",
    about = "A CLI tool to detect premade squads on game servers via Steam friend networks",
    long_about = "squad-radar cross-references the player roster of a Battlemetrics server page \
                  against a seed player's Steam friend network, and reports every player on the \
                  roster that is directly or transitively connected to the seed."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (scan, saved)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a server roster for players connected to a seed Steam profile
    ///
    /// Example: squad-radar scan https://steamcommunity.com/id/somebody \
    ///          https://www.battlemetrics.com/servers/rust/1234567
    Scan {
        /// Steam profile URL of the seed player
        ///
        /// This is a positional argument (required, no flag needed).
        /// The '/friends' suffix is appended automatically if missing.
        profile_url: String,

        /// Battlemetrics server page URL listing the current players
        ///
        /// This is a positional argument (required)
        server_url: String,

        /// Output results in JSON format instead of a table
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,

        /// Where to save the discovered players after a successful scan
        ///
        /// The file is a flat JSON list of { nickname, steamId } records
        /// and can be read back with the 'saved' subcommand.
        #[arg(long, default_value = "players.json")]
        store: PathBuf,
    },

    /// Print the players saved by the last successful scan
    ///
    /// Example: squad-radar saved --json
    Saved {
        /// Output the saved list in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Path of the saved player file to read
        #[arg(long, default_value = "players.json")]
        store: PathBuf,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why use structs and enums?
//    - Structs group related data (like the CLI arguments)
//    - Enums represent choices (like "scan OR saved")
//    - Both are core Rust types for organizing data
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. Why PathBuf instead of String for --store?
//    - PathBuf is the owned type for filesystem paths
//    - clap parses it directly from the argument
//    - It composes with std::fs functions without conversions
//
// 4. Why String instead of &str for the URLs?
//    - String is owned (the struct owns the data)
//    - &str is borrowed (references data owned elsewhere)
//    - We use String here because we need to own the CLI arguments
// -----------------------------------------------------------------------------
