//! Wire models for the episodes API.
//!
//! Every value here is created from a fetch response and replaced
//! wholesale by the next one; nothing is mutated in place.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::season_asset::season_asset_path;
use crate::types::{EntityId, Timestamp};

/// Display format for creation dates (day/month/year).
const DATE_LABEL_FORMAT: &str = "%d/%m/%Y";

/// Parse an ISO-8601 / RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, CoreError> {
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| CoreError::InvalidTimestamp(raw.to_string()))
}

/// Short `dd/mm/yyyy` label for a creation timestamp.
///
/// Falls back to the raw string when it does not parse.
pub fn date_label(raw: &str) -> String {
    match parse_timestamp(raw) {
        Ok(ts) => ts.format(DATE_LABEL_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Reject page numbers below 1.
pub fn validate_page(page: u32) -> Result<u32, CoreError> {
    if page == 0 {
        return Err(CoreError::InvalidPage(page));
    }
    Ok(page)
}

// ---------------------------------------------------------------------------
// Episode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EntityId,
    pub name: String,
    pub air_date: String,
    /// Episode code, e.g. `S01E05`.
    pub episode: String,
    /// Remote thumbnail. Not rendered; see [`Episode::season_asset`].
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub url: Option<String>,
    pub created: String,
}

impl Episode {
    /// Local thumbnail path derived from the episode code.
    pub fn season_asset(&self) -> String {
        season_asset_path(&self.episode)
    }

    pub fn created_at(&self) -> Option<Timestamp> {
        parse_timestamp(&self.created).ok()
    }

    pub fn created_label(&self) -> String {
        date_label(&self.created)
    }
}

// ---------------------------------------------------------------------------
// Character / Location
// ---------------------------------------------------------------------------

/// A `{ name, url }` reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub origin: NamedResource,
    /// Last known location.
    pub location: NamedResource,
    pub image: String,
    #[serde(default)]
    pub url: Option<String>,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub dimension: String,
    #[serde(default)]
    pub url: Option<String>,
    pub created: String,
}

// ---------------------------------------------------------------------------
// Pages and bundles
// ---------------------------------------------------------------------------

/// Pagination metadata reported by the server.
///
/// The capability flags are taken as-is from the response and never
/// recomputed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 1-based page number.
    pub page: u32,
    pub take: u32,
    pub item_count: u64,
    pub page_count: u32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// One page of episodes together with the metadata it came with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodePage {
    pub data: Vec<Episode>,
    pub meta: PageMeta,
}

/// Episode header plus its characters and locations, from one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetailBundle {
    pub episode: Episode,
    pub characters: Vec<Character>,
    pub locations: Vec<Location>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
