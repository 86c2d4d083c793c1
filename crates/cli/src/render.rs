//! Plain-text rendering of the list and detail views.

use std::fmt::Write;

use rickdex_browser::{DetailState, ListState};
use rickdex_core::{EpisodeDetailBundle, EpisodePage, PageMeta};

const NAME_WIDTH: usize = 32;
const AIR_DATE_WIDTH: usize = 20;
const ASSET_WIDTH: usize = 28;

/// Cut `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label}: disabled)")
    }
}

/// Footer with page position, totals and the two navigation controls.
pub fn render_footer(meta: &PageMeta) -> String {
    format!(
        "Page {} of {} · Total: {} episodes    {} {}",
        meta.page,
        meta.page_count,
        meta.item_count,
        control("p: Previous", meta.has_previous_page),
        control("n: Next", meta.has_next_page),
    )
}

pub fn render_page(page: &EpisodePage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:<ASSET_WIDTH$}  {:<8}  {:<NAME_WIDTH$}  {:<AIR_DATE_WIDTH$}  {}",
        "Id", "Image", "Episode", "Name", "Air date", "Created",
    );
    for episode in &page.data {
        let _ = writeln!(
            out,
            "{:>5}  {:<ASSET_WIDTH$}  {:<8}  {:<NAME_WIDTH$}  {:<AIR_DATE_WIDTH$}  {}",
            episode.id,
            episode.season_asset(),
            episode.episode,
            truncate(&episode.name, NAME_WIDTH),
            truncate(&episode.air_date, AIR_DATE_WIDTH),
            episode.created_label(),
        );
    }
    out.push_str(&render_footer(&page.meta));
    out
}

pub fn render_list(state: &ListState) -> String {
    match state {
        ListState::Idle => "No episodes loaded yet.".to_string(),
        ListState::Loading { previous: None, .. } => "Loading episodes...".to_string(),
        ListState::Loading {
            page,
            previous: Some(shown),
        } => format!("{}\nLoading page {page}...", render_page(shown)),
        ListState::Ready(page) => render_page(page),
        ListState::Failed {
            last_good: Some(shown),
            ..
        } => render_page(shown),
        ListState::Failed {
            last_good: None, ..
        } => "No episodes to show. Type `r` to try again.".to_string(),
    }
}

pub fn render_bundle(bundle: &EpisodeDetailBundle) -> String {
    let episode = &bundle.episode;
    let mut out = String::new();

    let _ = writeln!(out, "[{}] {}", episode.episode, episode.name);
    let _ = writeln!(out, "Image:    {}", episode.season_asset());
    let _ = writeln!(out, "Air date: {}", episode.air_date);
    let _ = writeln!(out, "Created:  {}", episode.created_label());

    let _ = writeln!(out, "\nCharacters ({})", bundle.characters.len());
    for character in &bundle.characters {
        let _ = writeln!(
            out,
            "  - {} | {} • {} | {}",
            character.name, character.species, character.status, character.location.name,
        );
    }

    let _ = writeln!(out, "\nLocations ({})", bundle.locations.len());
    for location in &bundle.locations {
        let _ = writeln!(
            out,
            "  - {} | Type: {} | Dimension: {}",
            location.name, location.kind, location.dimension,
        );
    }

    out.push_str("\nType `b` to go back.");
    out
}

pub fn render_detail(state: &DetailState) -> String {
    match state {
        DetailState::Idle => "No episode selected.".to_string(),
        DetailState::Loading { .. } => "Loading details...".to_string(),
        DetailState::Found(bundle) => render_bundle(bundle),
        DetailState::NotFound { .. } => "Episode not found.\nType `b` to go back.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rickdex_browser::BrowseError;
    use rickdex_core::{Character, Episode, Location, NamedResource};

    use super::*;

    fn episode(id: i64, code: &str, name: &str) -> Episode {
        Episode {
            id,
            name: name.into(),
            air_date: "December 2, 2013".into(),
            episode: code.into(),
            image: "https://example.test/remote.jpg".into(),
            url: None,
            created: "2017-11-10T12:56:33.798Z".into(),
        }
    }

    fn page(page: u32, has_previous_page: bool, has_next_page: bool) -> EpisodePage {
        EpisodePage {
            data: vec![episode(1, "S01E01", "Pilot"), episode(11, "S02E01", "A Rickle in Time")],
            meta: PageMeta {
                page,
                take: 10,
                item_count: 51,
                page_count: 6,
                has_previous_page,
                has_next_page,
            },
        }
    }

    #[test]
    fn first_page_footer_disables_previous_only() {
        let footer = render_footer(&page(1, false, true).meta);
        assert!(footer.starts_with("Page 1 of 6 · Total: 51 episodes"));
        assert!(footer.contains("(p: Previous: disabled)"));
        assert!(footer.contains("[n: Next]"));
    }

    #[test]
    fn table_uses_resolved_assets_not_remote_images() {
        let text = render_page(&page(1, false, true));
        assert!(text.contains("/assets/temporada-1.jpg"));
        assert!(text.contains("/assets/temporada-2.png"));
        assert!(!text.contains("remote.jpg"));
        assert!(text.contains("10/11/2017"));
    }

    #[test]
    fn loading_over_previous_page_keeps_it_visible() {
        let state = ListState::Loading {
            page: 2,
            previous: Some(Arc::new(page(1, false, true))),
        };
        let text = render_list(&state);
        assert!(text.contains("Pilot"));
        assert!(text.ends_with("Loading page 2..."));
    }

    #[test]
    fn failure_without_data_suggests_retry() {
        let state = ListState::Failed {
            last_good: None,
            error: BrowseError::NetworkOrServer {
                message: "down".into(),
            },
        };
        assert!(render_list(&state).contains("try again"));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn detail_lists_characters_and_locations() {
        let place = NamedResource {
            name: "Citadel of Ricks".into(),
            url: String::new(),
        };
        let bundle = EpisodeDetailBundle {
            episode: episode(28, "S03E07", "The Ricklantis Mixup"),
            characters: vec![Character {
                id: 1,
                name: "Rick Sanchez".into(),
                status: "Alive".into(),
                species: "Human".into(),
                kind: String::new(),
                gender: "Male".into(),
                origin: place.clone(),
                location: place,
                image: String::new(),
                url: None,
                created: "2017-11-04T18:48:46.250Z".into(),
            }],
            locations: vec![Location {
                id: 3,
                name: "Citadel of Ricks".into(),
                kind: "Space station".into(),
                dimension: "unknown".into(),
                url: None,
                created: "2017-11-10T13:08:13.191Z".into(),
            }],
        };

        let text = render_detail(&DetailState::Found(Arc::new(bundle)));

        assert!(text.starts_with("[S03E07] The Ricklantis Mixup"));
        assert!(text.contains("Image:    /assets/temporada-3.jpg"));
        assert!(text.contains("Characters (1)"));
        assert!(text.contains("  - Rick Sanchez | Human • Alive | Citadel of Ricks"));
        assert!(text.contains("Locations (1)"));
        assert!(text.contains("Type: Space station | Dimension: unknown"));
    }

    #[test]
    fn not_found_offers_a_way_back() {
        let text = render_detail(&DetailState::NotFound {
            episode_id: "999".into(),
        });
        assert!(text.contains("Episode not found."));
        assert!(text.contains("`b`"));
    }
}
