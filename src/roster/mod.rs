// src/roster/mod.rs
// =============================================================================
// This module extracts the player roster from a server page.
//
// The roster is the list of in-game nicknames currently shown on a
// Battlemetrics server page. It's the "who is online right now" half of
// the detection: friend networks get matched against these names.
//
// Rust concepts:
// - Modules: Organizing related functionality
// - pub use: Re-export items to simplify imports
// =============================================================================

mod extract;

// Re-export the main function from extract.rs
pub use extract::extract_roster;
