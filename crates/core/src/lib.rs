//! Domain types shared by every rickdex crate.
//!
//! Holds the wire models returned by the episodes API, the season asset
//! resolver used for episode thumbnails, and the small set of constants
//! both browsing views agree on.

pub mod error;
pub mod models;
pub mod season_asset;
pub mod types;

pub use error::CoreError;
pub use models::{
    Character, Episode, EpisodeDetailBundle, EpisodePage, Location, NamedResource, PageMeta,
};
pub use season_asset::season_asset_path;

/// Number of episodes requested per list page.
pub const PAGE_SIZE: u32 = 10;
