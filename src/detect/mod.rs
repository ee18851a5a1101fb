// src/detect/mod.rs
// =============================================================================
// This module is the heart of squad-radar: the breadth-first traversal
// that walks a seed player's friend network and matches it against the
// server roster.
//
// Everything else in the crate is plumbing around this module:
// - steam:: fetches and extracts the pages the engine asks for
// - roster:: turns the server page into the list of names to match
// - store:: persists what the engine finds
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports
// =============================================================================

mod engine;

// Re-export the engine entry point and its result types
pub use engine::{detect, DetectionResult, DiscoveredPlayer, Edge};
