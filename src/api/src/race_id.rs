//! Race ID extraction from pasted text.
//!
//! Accepts a bare netkeiba race id, a race card URL
//! (`...shutuba.html?race_id=202305050811`) or a result URL
//! (`https://db.netkeiba.com/race/202305050811/`).

use regex::Regex;
use std::sync::LazyLock;

/// netkeiba race ids: year(4) + venue(2) + meeting(2) + day(2) + race(2)
pub const RACE_ID_LEN: usize = 12;

static QUERY_RE: LazyLock<Regex> = LazyLock::new(|| id_regex(r"race_id=", r"(?:\D|$)"));
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| id_regex(r"/race/", r"(?:\D|$)"));
static BARE_RE: LazyLock<Regex> = LazyLock::new(|| id_regex(r"^", r"$"));

/// `prefix`, a captured id of exactly [`RACE_ID_LEN`] digits, then `suffix`
fn id_regex(prefix: &str, suffix: &str) -> Regex {
    let pattern = format!(r"{}(\d{{{}}}){}", prefix, RACE_ID_LEN, suffix);
    Regex::new(&pattern).unwrap()
}

/// Canonical race id found in `input`, if any
pub fn extract_race_id(input: &str) -> Option<String> {
    let input = input.trim();

    for re in [&*QUERY_RE, &*PATH_RE, &*BARE_RE] {
        if let Some(caps) = re.captures(input) {
            return Some(caps[1].to_string());
        }
    }

    None
}

/// Build the race card URL for a race id
pub fn race_card_url(race_id: &str) -> String {
    format!("https://race.netkeiba.com/race/shutuba.html?race_id={}", race_id)
}
