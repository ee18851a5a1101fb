// src/detect/engine.rs
// =============================================================================
// This module implements squad detection as a breadth-first traversal
// of the seed player's friend network.
//
// How it works:
// 1. Fetch the server page and extract the roster (who is online)
// 2. Fetch the seed profile's friends page
// 3. Keep the seed's roster-matching friends as the first frontier
// 4. Expand the frontier one profile at a time: fetch each candidate's
//    friends page, record the profile, match its friends against the
//    roster, and stage newly-seen matches for the next level
// 5. Repeat until a level discovers nobody new
//
// Failure policy:
// - Roster fetch or seed fetch failing aborts the run (nothing useful
//   can be computed without them)
// - A candidate fetch failing drops just that candidate with a warning;
//   the rest of the level carries on
//
// Ordering:
// - Edges and discovered players are recorded in strict level order, and
//   within a level in frontier order, so a given sequence of fetch
//   outcomes always produces the same result
//
// Rust concepts:
// - HashSet: To deduplicate steamids (O(1) lookup)
// - Generics: The engine works against any PageSource implementation
// - async/await: The engine suspends at every fetch
// =============================================================================

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;

use crate::roster::extract_roster;
use crate::steam::{extract_profile, friends_page_url, profile_url, FriendRecord, PageSource};

// One player accepted into the result: the seed, or a friend (direct or
// transitive) whose nickname matched the roster
//
// camelCase keeps the JSON shape aligned with the saved player file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredPlayer {
    /// Display name at the time the profile was fetched
    pub nickname: String,
    /// Stable steamid (the dedup key for the whole traversal)
    pub steam_id: String,
}

// A vouching relationship: `from`'s friend list contained `to`, and `to`
// was on the roster at the time of the run
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

// Everything a run produces
//
// `friends` is insertion-ordered and contains each steamid at most once;
// the seed is always its first entry.
#[derive(Debug, Serialize)]
pub struct DetectionResult {
    /// Discovered players, seed first, then in discovery order
    pub friends: Vec<DiscoveredPlayer>,
    /// Vouching edges in strict traversal order
    pub edges: Vec<Edge>,
    /// The roster as extracted from the server page
    pub roster: Vec<String>,
}

// The roster membership test, isolated in one place on purpose.
//
// Matching is exact, case-sensitive string equality on display names.
// Display names are neither stable nor unique, so two strangers sharing
// a nickname are indistinguishable here; if the roster source ever grows
// stable ids, this is the only function that has to change.
fn on_roster(roster: &HashSet<&str>, nickname: &str) -> bool {
    roster.contains(nickname)
}

// Runs a full detection
//
// Parameters:
//   source: where raw pages come from (HTTP in production, a fake in tests)
//   seed_profile_url: the seed player's Steam profile URL
//   server_url: the Battlemetrics server page URL
//
// Returns: the discovered players, the traversal edges, and the roster.
// Fails only when the roster page or the seed's friends page cannot be
// fetched; everything past that point degrades per-candidate.
pub async fn detect<S: PageSource>(
    source: &S,
    seed_profile_url: &str,
    server_url: &str,
) -> Result<DetectionResult> {
    // Step 1: the roster. A failed fetch is fatal, but an empty roster is
    // not: it simply matches nothing and the result is the seed alone.
    let server_html = source
        .fetch(server_url)
        .await
        .context("could not fetch the server roster page")?;
    let roster = extract_roster(&server_html);
    if roster.is_empty() {
        eprintln!("  Warning: no players found on the server page");
    }

    // Membership lookups happen once per friend of every expanded profile,
    // so build a set view up front. The Vec keeps page order (and any
    // duplicate names) for the result.
    let roster_set: HashSet<&str> = roster.iter().map(String::as_str).collect();

    // Step 2: the seed profile. Also fatal on fetch failure.
    let seed_html = source
        .fetch(&friends_page_url(seed_profile_url))
        .await
        .context("could not fetch the seed profile's friends page")?;
    let seed = extract_profile(&seed_html);

    // Discovery state. `visited` guards against fetching any steamid
    // twice; `players` carries the same entries in discovery order.
    let mut visited: HashSet<String> = HashSet::new();
    let mut players: Vec<DiscoveredPlayer> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    // Step 3: the seed joins the result unconditionally. It does not need
    // to be on the roster; it's the anchor everything is measured from.
    visited.insert(seed.steam_id.clone());
    players.push(DiscoveredPlayer {
        nickname: seed.name.clone(),
        steam_id: seed.steam_id.clone(),
    });

    // Step 4: the first frontier is the seed's roster-matching friends.
    // Every match contributes an edge; only ids not yet seen (and not
    // already staged this level) are queued for expansion.
    let mut frontier: Vec<FriendRecord> = Vec::new();
    let mut staged: HashSet<String> = HashSet::new();
    for friend in &seed.friends {
        if !on_roster(&roster_set, &friend.nickname) {
            continue;
        }
        edges.push(Edge {
            from: seed.name.clone(),
            to: friend.nickname.clone(),
        });
        if !visited.contains(&friend.steam_id) && staged.insert(friend.steam_id.clone()) {
            frontier.push(friend.clone());
        }
    }

    // Step 5: level loop. Each pass expands the current frontier in order
    // and builds the next one. Termination: a frontier only ever admits
    // ids absent from `visited`, and `visited` only grows, so eventually
    // a level stages nobody and the loop ends.
    let mut level = 1;
    while !frontier.is_empty() {
        let mut next_frontier: Vec<FriendRecord> = Vec::new();
        let mut staged: HashSet<String> = HashSet::new();

        for candidate in &frontier {
            let candidate_url = friends_page_url(&profile_url(&candidate.steam_id));
            println!(
                "  Expanding [level {}]: {} ({})",
                level, candidate.nickname, candidate.steam_id
            );

            // One fetch at a time. A failed candidate is dropped for the
            // whole run; anything reachable only through it stays
            // undiscovered.
            let html = match source.fetch(&candidate_url).await {
                Ok(content) => content,
                Err(e) => {
                    eprintln!(
                        "  Warning: Failed to fetch friends of {} ({}): {}",
                        candidate.nickname, candidate.steam_id, e
                    );
                    continue;
                }
            };
            let profile = extract_profile(&html);

            // Record the profile under its own extracted id and name.
            // insert() returning false means we'd somehow seen it before;
            // the player list must not grow a duplicate in that case.
            if visited.insert(profile.steam_id.clone()) {
                players.push(DiscoveredPlayer {
                    nickname: profile.name.clone(),
                    steam_id: profile.steam_id.clone(),
                });
            }

            for friend in &profile.friends {
                if !on_roster(&roster_set, &friend.nickname) {
                    continue;
                }
                edges.push(Edge {
                    from: profile.name.clone(),
                    to: friend.nickname.clone(),
                });
                if !visited.contains(&friend.steam_id) && staged.insert(friend.steam_id.clone())
                {
                    next_frontier.push(friend.clone());
                }
            }
        }

        frontier = next_frontier;
        level += 1;
    }

    // Step 6: frontier drained, traversal complete
    Ok(DetectionResult {
        friends: players,
        edges,
        roster,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why breadth-first?
//    - Friends of the seed come out before friends-of-friends, which is
//      the order a human would read the result in
//    - Level-by-level frontiers make "visit everyone exactly once" easy
//      to enforce with one HashSet
//
// 2. Why two sets (visited AND staged)?
//    - visited covers everything already recorded in earlier levels
//    - staged covers ids queued earlier in the SAME level, which visited
//      can't see yet because they haven't been fetched
//    - Together they guarantee no id enters a frontier twice
//
// 3. Why does the engine take S: PageSource instead of a Client?
//    - Generics let the compiler pick the implementation: reqwest in
//      main.rs, an in-memory fake in the tests below
//    - The engine's logic is identical either way, which is exactly what
//      makes it testable without a network
//
// 4. Why match by nickname at all if it's unreliable?
//    - The roster page only shows display names; there is no stable id
//      to match on from that side
//    - The weakness is real (two players sharing a name get merged) and
//      is confined to on_roster() so a better policy can slot in later
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // An in-memory PageSource: scripted pages, scripted failures, and a
    // log of every fetch for asserting call counts
    struct FakePageSource {
        pages: HashMap<String, String>,
        failing: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakePageSource {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                failing: HashSet::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_page(mut self, url: &str, content: String) -> Self {
            self.pages.insert(url.to_string(), content);
            self
        }

        fn with_failure(mut self, url: &str) -> Self {
            self.failing.insert(url.to_string());
            self
        }

        fn fetch_count(&self, url: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|called| called.as_str() == url)
                .count()
        }
    }

    #[async_trait]
    impl PageSource for FakePageSource {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.calls.lock().unwrap().push(url.to_string());
            if self.failing.contains(url) {
                bail!("simulated transport failure");
            }
            // Unknown pages are "no data", not errors, per the contract
            Ok(self.pages.get(url).cloned().unwrap_or_default())
        }
    }

    // --- page builders -----------------------------------------------------

    fn server_page(names: &[&str]) -> String {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                format!(
                    r#"<a class="css-fj458c" href="/players/{}">{}</a>"#,
                    i + 1,
                    name
                )
            })
            .collect()
    }

    fn profile_page(name: &str, steam_id: &str, friends: &[(&str, &str)]) -> String {
        let mut html = format!(
            r#"<meta property="og:title" content="{}"><script>{{"url":"x","steamid":"{}","p":"y"}}</script>"#,
            name, steam_id
        );
        for (id, nick) in friends {
            html.push_str(&format!(
                r#"<div data-steamid="{}"><div class="friend_block_content">{}<br><span>Online</span></div></div>"#,
                id, nick
            ));
        }
        html
    }

    fn candidate_url(steam_id: &str) -> String {
        friends_page_url(&profile_url(steam_id))
    }

    const SERVER: &str = "https://www.battlemetrics.com/servers/rust/42";
    const SEED: &str = "https://steamcommunity.com/id/seed";
    const SEED_FRIENDS: &str = "https://steamcommunity.com/id/seed/friends";

    fn ids(result: &DetectionResult) -> Vec<&str> {
        result
            .friends
            .iter()
            .map(|p| p.steam_id.as_str())
            .collect()
    }

    // --- tests -------------------------------------------------------------

    #[tokio::test]
    async fn test_transitive_discovery_scenario() {
        // roster: Bob, Carol; seed knows Bob and Dave (off-roster);
        // Bob knows Carol. Expected: seed, Bob, Carol; Dave never appears.
        let source = FakePageSource::new()
            .with_page(SERVER, server_page(&["Bob", "Carol"]))
            .with_page(
                SEED_FRIENDS,
                profile_page("Seedling", "seed1", &[("id1", "Bob"), ("id2", "Dave")]),
            )
            .with_page(
                &candidate_url("id1"),
                profile_page("Bob", "id1", &[("id3", "Carol")]),
            )
            .with_page(&candidate_url("id3"), profile_page("Carol", "id3", &[]));

        let result = detect(&source, SEED, SERVER).await.unwrap();

        assert_eq!(ids(&result), vec!["seed1", "id1", "id3"]);
        assert_eq!(result.friends[0].nickname, "Seedling");
        assert_eq!(result.friends[1].nickname, "Bob");
        assert_eq!(result.friends[2].nickname, "Carol");

        let edge_pairs: Vec<(&str, &str)> = result
            .edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(edge_pairs, vec![("Seedling", "Bob"), ("Bob", "Carol")]);

        // Every edge target was on the roster
        for edge in &result.edges {
            assert!(result.roster.contains(&edge.to));
        }

        // Dave (id2) was never fetched and never appears anywhere
        assert_eq!(source.fetch_count(&candidate_url("id2")), 0);
        assert!(result.friends.iter().all(|p| p.nickname != "Dave"));
    }

    #[tokio::test]
    async fn test_empty_roster_yields_seed_only() {
        let source = FakePageSource::new()
            .with_page(SERVER, String::new())
            .with_page(
                SEED_FRIENDS,
                profile_page("Seedling", "seed1", &[("id1", "Bob")]),
            );

        let result = detect(&source, SEED, SERVER).await.unwrap();

        assert_eq!(ids(&result), vec!["seed1"]);
        assert!(result.edges.is_empty());
        assert!(result.roster.is_empty());
    }

    #[tokio::test]
    async fn test_roster_fetch_failure_is_fatal() {
        let source = FakePageSource::new()
            .with_failure(SERVER)
            .with_page(SEED_FRIENDS, profile_page("Seedling", "seed1", &[]));

        assert!(detect(&source, SEED, SERVER).await.is_err());
    }

    #[tokio::test]
    async fn test_seed_fetch_failure_is_fatal() {
        let source = FakePageSource::new()
            .with_page(SERVER, server_page(&["Bob"]))
            .with_failure(SEED_FRIENDS);

        assert!(detect(&source, SEED, SERVER).await.is_err());
    }

    #[tokio::test]
    async fn test_failed_candidate_does_not_stop_the_level() {
        // Both Bob and Carol are on the roster and friends of the seed;
        // Bob's page fails to load. Carol must still be discovered.
        let source = FakePageSource::new()
            .with_page(SERVER, server_page(&["Bob", "Carol"]))
            .with_page(
                SEED_FRIENDS,
                profile_page("Seedling", "seed1", &[("id1", "Bob"), ("id2", "Carol")]),
            )
            .with_failure(&candidate_url("id1"))
            .with_page(&candidate_url("id2"), profile_page("Carol", "id2", &[]));

        let result = detect(&source, SEED, SERVER).await.unwrap();

        // Bob stays an edge target (his name matched) but never becomes a
        // discovered player because his profile could not be read
        assert_eq!(ids(&result), vec!["seed1", "id2"]);
        assert_eq!(result.edges.len(), 2);
    }

    #[tokio::test]
    async fn test_cycle_terminates_and_visits_once() {
        // Bob and Carol are mutual friends; both on the roster. The
        // traversal must terminate and fetch each exactly once.
        let source = FakePageSource::new()
            .with_page(SERVER, server_page(&["Bob", "Carol"]))
            .with_page(
                SEED_FRIENDS,
                profile_page("Seedling", "seed1", &[("id1", "Bob")]),
            )
            .with_page(
                &candidate_url("id1"),
                profile_page("Bob", "id1", &[("id2", "Carol")]),
            )
            .with_page(
                &candidate_url("id2"),
                profile_page("Carol", "id2", &[("id1", "Bob")]),
            );

        let result = detect(&source, SEED, SERVER).await.unwrap();

        assert_eq!(ids(&result), vec!["seed1", "id1", "id2"]);
        assert_eq!(source.fetch_count(&candidate_url("id1")), 1);
        assert_eq!(source.fetch_count(&candidate_url("id2")), 1);
    }

    #[tokio::test]
    async fn test_shared_friend_staged_once_per_level() {
        // Bob and Carol both vouch for Dale within the same level: two
        // edges, but only one fetch of Dale's page.
        let source = FakePageSource::new()
            .with_page(SERVER, server_page(&["Bob", "Carol", "Dale"]))
            .with_page(
                SEED_FRIENDS,
                profile_page("Seedling", "seed1", &[("id1", "Bob"), ("id2", "Carol")]),
            )
            .with_page(
                &candidate_url("id1"),
                profile_page("Bob", "id1", &[("id3", "Dale")]),
            )
            .with_page(
                &candidate_url("id2"),
                profile_page("Carol", "id2", &[("id3", "Dale")]),
            )
            .with_page(&candidate_url("id3"), profile_page("Dale", "id3", &[]));

        let result = detect(&source, SEED, SERVER).await.unwrap();

        assert_eq!(ids(&result), vec!["seed1", "id1", "id2", "id3"]);
        let dale_edges = result.edges.iter().filter(|e| e.to == "Dale").count();
        assert_eq!(dale_edges, 2);
        assert_eq!(source.fetch_count(&candidate_url("id3")), 1);
    }

    #[tokio::test]
    async fn test_seed_kept_even_when_not_on_roster() {
        // The seed's name is nowhere on the roster; it is still the first
        // entry of the result.
        let source = FakePageSource::new()
            .with_page(SERVER, server_page(&["Somebody"]))
            .with_page(SEED_FRIENDS, profile_page("Seedling", "seed1", &[]));

        let result = detect(&source, SEED, SERVER).await.unwrap();

        assert_eq!(ids(&result), vec!["seed1"]);
        assert_eq!(result.roster, vec!["Somebody"]);
    }

    #[tokio::test]
    async fn test_matching_is_case_sensitive() {
        // "bob" on the roster does not match friend "Bob"
        let source = FakePageSource::new()
            .with_page(SERVER, server_page(&["bob"]))
            .with_page(
                SEED_FRIENDS,
                profile_page("Seedling", "seed1", &[("id1", "Bob")]),
            );

        let result = detect(&source, SEED, SERVER).await.unwrap();

        assert_eq!(ids(&result), vec!["seed1"]);
        assert!(result.edges.is_empty());
    }
}
