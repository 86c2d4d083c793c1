//! Season thumbnail resolution.
//!
//! Episode thumbnails come from bundled per-season artwork rather than
//! the remote `image` field. The season is read from the episode code
//! (`S<season>E<episode>`) and mapped to a file under `/assets`.

use std::sync::LazyLock;

use regex::Regex;

/// First `S<digits>E` in an episode code. ASCII digits only; the episode
/// suffix is ignored.
static SEASON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S([0-9]+)E").expect("valid regex"));

/// Asset used when the code carries no recognisable season.
pub const DEFAULT_SEASON_ASSET: &str = "/assets/temporada-1.jpg";

/// Image format used for seasons missing from the table.
const DEFAULT_FORMAT: &str = "jpg";

/// File extension of the bundled artwork for a season. Seasons 1, 3, 4
/// and 7 fall through to `jpg`.
pub fn season_image_format(season: u64) -> &'static str {
    match season {
        2 => "png",
        5 => "webp",
        6 => "jpeg",
        _ => DEFAULT_FORMAT,
    }
}

/// Season digits of an episode code with leading zeros removed.
///
/// An all-zero run normalizes to `"0"`. Digit runs longer than any
/// integer type are kept as text so the caller never has to fail.
fn season_digits(episode_code: &str) -> Option<String> {
    let caps = SEASON_RE.captures(episode_code)?;
    let digits = caps.get(1)?.as_str().trim_start_matches('0');
    if digits.is_empty() {
        Some("0".to_string())
    } else {
        Some(digits.to_string())
    }
}

/// Season number of an episode code, if it has one that fits in a `u64`.
pub fn season_number(episode_code: &str) -> Option<u64> {
    season_digits(episode_code)?.parse().ok()
}

/// Resolve the local thumbnail for an episode code.
///
/// Total and deterministic: codes without an `S<digits>E` segment map to
/// [`DEFAULT_SEASON_ASSET`].
///
/// ```
/// use rickdex_core::season_asset::season_asset_path;
///
/// assert_eq!(season_asset_path("S01E05"), "/assets/temporada-1.jpg");
/// assert_eq!(season_asset_path("S5E01"), "/assets/temporada-5.webp");
/// assert_eq!(season_asset_path("special"), "/assets/temporada-1.jpg");
/// ```
pub fn season_asset_path(episode_code: &str) -> String {
    let Some(digits) = season_digits(episode_code) else {
        return DEFAULT_SEASON_ASSET.to_string();
    };

    let format = digits
        .parse::<u64>()
        .map(season_image_format)
        .unwrap_or(DEFAULT_FORMAT);

    format!("/assets/temporada-{digits}.{format}")
}
