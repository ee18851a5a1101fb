// src/steam/mod.rs
// =============================================================================
// This module handles everything Steam-side:
//
// Submodules:
// - source: The PageSource trait and its HTTP implementation (reqwest),
//           plus canonical Steam URL derivation
// - profile: Extraction of a profile's name, steamid and friend list
//            from a fetched friends page
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod profile;
mod source;

// Re-export public items from submodules
// This lets users write `steam::extract_profile()` instead of
// `steam::profile::extract_profile()`
pub use profile::{extract_profile, FriendRecord, ProfileSnapshot};
pub use source::{friends_page_url, profile_url, HttpPageSource, PageSource};
