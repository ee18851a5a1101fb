// src/steam/profile.rs
// =============================================================================
// This module extracts structured data from a Steam friends page.
//
// A friends page carries three things we care about:
// - The profile's display name, in the og:title meta tag
// - The profile's steamid, buried in an inline script blob as
//   ,"steamid":"...", (not in the DOM, so we use a regex for it)
// - One block per friend carrying data-steamid plus the friend's
//   display name inside .friend_block_content
//
// We use the `scraper` crate for the DOM-shaped patterns and `regex`
// for the script blob.
//
// Extraction never fails the fetch: a missing pattern just degrades to
// the "Unknown" sentinel (or to a skipped friend record), because a page
// that renders differently shouldn't abort a whole traversal.
//
// Rust concepts:
// - Option<T>: For values that might be absent
// - Iterators and closures: For walking selected elements
// =============================================================================

use regex::Regex;
use scraper::{Html, Selector};

/// Sentinel used when a pattern is absent from otherwise-valid content
pub const UNKNOWN: &str = "Unknown";

// One entry of a profile's friend list, as reported by the friends page
//
// The steamid is the stable key; the nickname is whatever the friend
// displayed at fetch time (it can change, and it is not unique).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRecord {
    pub steam_id: String,
    pub nickname: String,
}

// Everything we extract from one friends page
//
// Immutable after extraction: the engine never writes back into it.
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    /// The profile's display name
    pub name: String,
    /// The profile's stable steamid
    pub steam_id: String,
    /// The friend list in page order
    pub friends: Vec<FriendRecord>,
}

// Extracts a ProfileSnapshot from friends-page HTML
//
// Parameters:
//   html: the raw page content (borrowed as &str)
//
// Returns: a snapshot; name/steam_id fall back to "Unknown" when their
// pattern is missing, and the friend list is empty when no blocks match.
pub fn extract_profile(html: &str) -> ProfileSnapshot {
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selectors are constants and known
    // to be valid.
    let title_selector = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    let block_selector = Selector::parse("[data-steamid]").unwrap();
    let content_selector = Selector::parse(".friend_block_content").unwrap();

    // Display name from the og:title meta tag
    let name = document
        .select(&title_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .unwrap_or(UNKNOWN)
        .to_string();

    // The profile's own steamid only appears inside an inline script blob,
    // so the DOM can't help us; match the raw text instead.
    // Same constant-pattern reasoning as the selectors above.
    let steamid_pattern = Regex::new(r#","steamid":"(.+?)","#).unwrap();
    let steam_id = steamid_pattern
        .captures(html)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    // One block per friend. The block's data-steamid attribute is the
    // friend's id; the first non-empty text inside .friend_block_content
    // is the display name (the text after the <br> is presence status,
    // which lives in its own element and so in later text nodes).
    let mut friends = Vec::new();
    for block in document.select(&block_selector) {
        // attr is guaranteed present by the selector itself
        let steam_id = match block.value().attr("data-steamid") {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => continue,
        };

        let nickname = block
            .select(&content_selector)
            .next()
            .and_then(|content| {
                content
                    .text()
                    .map(str::trim)
                    .find(|text| !text.is_empty())
            })
            .map(str::to_string);

        // A block without a readable name tells us nothing useful
        let nickname = match nickname {
            Some(n) => n,
            None => continue,
        };

        friends.push(FriendRecord { steam_id, nickname });
    }

    ProfileSnapshot {
        name,
        steam_id,
        friends,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why both scraper AND regex?
//    - scraper parses HTML into a DOM and answers CSS-selector queries
//    - But the steamid is inside <script> text, which the DOM only sees
//      as an opaque string, so a regex over the raw page is the right tool
//
// 2. What does .text() return?
//    - An iterator over every text node under the element, in order
//    - For a friend block that's the name first, then the status line,
//      which is why "first non-empty" picks the name
//
// 3. Why sentinel values instead of errors?
//    - Steam renders private or empty profiles with most of the page
//      intact; failing the whole run over one missing tag would be wrong
//    - "Unknown" keeps the snapshot total, and callers decide what
//      missing data means to them
//
// 4. What is unwrap_or_else vs unwrap_or?
//    - unwrap_or(value) takes an already-built value
//    - unwrap_or_else(|| value) takes a closure, only run when needed
//    - We use _else for the String case to avoid allocating up front
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a minimal friends page exercising all three patterns
    fn friends_page(name: &str, steam_id: &str, friends: &[(&str, &str)]) -> String {
        let mut html = format!(
            r#"<html><head><meta property="og:title" content="{}"></head><body>"#,
            name
        );
        html.push_str(&format!(
            r#"<script>g_rgProfileData = {{"url":"x","steamid":"{}","personaname":"{}"}};</script>"#,
            steam_id, name
        ));
        for (id, nick) in friends {
            html.push_str(&format!(
                r#"<div class="friend_block_v2" data-steamid="{}">
                     <div class="friend_block_content">{}<br>
                       <span class="friend_small_text">Online</span>
                     </div>
                   </div>"#,
                id, nick
            ));
        }
        html.push_str("</body></html>");
        html
    }

    #[test]
    fn test_extract_full_profile() {
        let html = friends_page(
            "Robin",
            "76561197960435530",
            &[("111", "Bob"), ("222", "Carol")],
        );
        let profile = extract_profile(&html);

        assert_eq!(profile.name, "Robin");
        assert_eq!(profile.steam_id, "76561197960435530");
        assert_eq!(
            profile.friends,
            vec![
                FriendRecord {
                    steam_id: "111".to_string(),
                    nickname: "Bob".to_string()
                },
                FriendRecord {
                    steam_id: "222".to_string(),
                    nickname: "Carol".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_patterns_default_to_unknown() {
        let profile = extract_profile("<html><body>nothing here</body></html>");
        assert_eq!(profile.name, UNKNOWN);
        assert_eq!(profile.steam_id, UNKNOWN);
        assert!(profile.friends.is_empty());
    }

    #[test]
    fn test_friend_names_are_trimmed() {
        let html = friends_page("Robin", "123", &[("111", "  Spacey  ")]);
        let profile = extract_profile(&html);
        assert_eq!(profile.friends[0].nickname, "Spacey");
    }

    #[test]
    fn test_block_without_name_is_skipped() {
        let html = r#"<div data-steamid="111"><div class="friend_block_content"> </div></div>"#;
        let profile = extract_profile(html);
        assert!(profile.friends.is_empty());
    }

    #[test]
    fn test_empty_content() {
        let profile = extract_profile("");
        assert_eq!(profile.name, UNKNOWN);
        assert_eq!(profile.steam_id, UNKNOWN);
        assert!(profile.friends.is_empty());
    }
}
