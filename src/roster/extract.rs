// src/roster/extract.rs
// =============================================================================
// This module extracts player nicknames from a Battlemetrics server page.
//
// Battlemetrics renders each online player as an anchor like:
//
//   <a class="css-fj458c" href="/players/123456">NicknameHere</a>
//
// We select those anchors and take their text, in document order.
//
// The roster is deliberately dumb: an ordered list of display strings.
// Duplicate nicknames are kept as-is (two players really can share a
// name), and no normalization is applied beyond what the page itself
// contains.
//
// Rust concepts:
// - Iterators: select → map → collect pipelines
// =============================================================================

use scraper::{Html, Selector};

// Extracts the roster from server-page HTML
//
// Parameters:
//   html: the page content to parse (borrowed as &str)
//
// Returns: Vec<String> of nicknames in page order; empty content or a
// page with no player anchors yields an empty vector.
pub fn extract_roster(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Constant selector, known valid, so .unwrap() is fine here
    let selector = Selector::parse(r#"a.css-fj458c[href^="/players/"]"#).unwrap();

    document
        .select(&selector)
        .map(|anchor| anchor.text().collect::<String>())
        .filter(|nickname| !nickname.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_anchor(id: u32, name: &str) -> String {
        format!(
            r#"<a class="css-fj458c" href="/players/{}">{}</a>"#,
            id, name
        )
    }

    #[test]
    fn test_extract_players_in_order() {
        let html = format!(
            "{}{}{}",
            player_anchor(1, "Bob"),
            player_anchor(2, "Carol"),
            player_anchor(3, "Dave")
        );
        assert_eq!(extract_roster(&html), vec!["Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let html = format!("{}{}", player_anchor(1, "Bob"), player_anchor(2, "Bob"));
        assert_eq!(extract_roster(&html), vec!["Bob", "Bob"]);
    }

    #[test]
    fn test_other_anchors_ignored() {
        let html = r#"<a class="css-other" href="/players/1">NotCounted</a>
                      <a class="css-fj458c" href="/servers/1">AlsoNot</a>"#;
        assert!(extract_roster(html).is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(extract_roster("").is_empty());
    }
}
