use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An inclusive bucket of episode numbers, labelled `"start-end"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeRange {
    pub start: u32,
    pub end: u32,
}

impl EpisodeRange {
    pub fn new(start: u32, end: u32) -> Self {
        EpisodeRange { start, end }
    }

    pub fn contains(&self, episode: u32) -> bool {
        episode >= self.start && episode <= self.end
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for EpisodeRange {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::EpisodeRange(label.to_string());
        let (start, end) = label.split_once('-').ok_or_else(invalid)?;
        let start: u32 = start.trim().parse().map_err(|_| invalid())?;
        let end: u32 = end.trim().parse().map_err(|_| invalid())?;
        if start > end {
            return Err(invalid());
        }
        Ok(EpisodeRange { start, end })
    }
}

/// Episodes numbered `1..=count`, split into contiguous buckets.
#[derive(Debug, Clone)]
pub struct EpisodeCatalog {
    episodes: Vec<u32>,
    ranges: Vec<EpisodeRange>,
}

impl EpisodeCatalog {
    pub fn new(count: u32, bucket_size: u32) -> Self {
        let bucket_size = bucket_size.max(1);
        let episodes: Vec<u32> = (1..=count).collect();
        let ranges = episodes
            .chunks(bucket_size as usize)
            .filter_map(|chunk| Some(EpisodeRange::new(*chunk.first()?, *chunk.last()?)))
            .collect();
        EpisodeCatalog { episodes, ranges }
    }

    pub fn episodes(&self) -> &[u32] {
        &self.episodes
    }

    pub fn ranges(&self) -> &[EpisodeRange] {
        &self.ranges
    }

    pub fn first_range(&self) -> EpisodeRange {
        self.ranges
            .first()
            .copied()
            .unwrap_or(EpisodeRange::new(1, 0))
    }
}

/// Episodes inside `range` whose number contains `search`, in order.
/// An empty search keeps the whole bucket.
pub fn filter_episodes(all: &[u32], range: EpisodeRange, search: &str) -> Vec<u32> {
    all.iter()
        .copied()
        .filter(|episode| range.contains(*episode))
        .filter(|episode| search.is_empty() || episode.to_string().contains(search))
        .collect()
}

/// Selection state of the episode grid.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeFilterState {
    pub active_range: EpisodeRange,
    pub search_term: String,
    pub active_episode: u32,
}

impl EpisodeFilterState {
    pub fn new(catalog: &EpisodeCatalog) -> Self {
        EpisodeFilterState {
            active_range: catalog.first_range(),
            search_term: String::new(),
            active_episode: catalog.episodes().first().copied().unwrap_or(1),
        }
    }

    pub fn filtered(&self, catalog: &EpisodeCatalog) -> Vec<u32> {
        filter_episodes(catalog.episodes(), self.active_range, &self.search_term)
    }

    pub fn select_range(&mut self, range: EpisodeRange) {
        self.active_range = range;
    }

    pub fn select_episode(&mut self, episode: u32) {
        self.active_episode = episode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_bucket_and_search() {
        let catalog = EpisodeCatalog::new(100, 20);
        let range: EpisodeRange = "21-40".parse().unwrap();
        assert_eq!(filter_episodes(catalog.episodes(), range, "5"), vec![25, 35]);
    }

    #[test]
    fn test_empty_search_returns_full_bucket() {
        let catalog = EpisodeCatalog::new(100, 20);
        let range: EpisodeRange = "1-20".parse().unwrap();
        let expected: Vec<u32> = (1..=20).collect();
        assert_eq!(filter_episodes(catalog.episodes(), range, ""), expected);
    }

    #[test]
    fn test_search_without_matches() {
        let catalog = EpisodeCatalog::new(100, 20);
        let range = EpisodeRange::new(1, 20);
        assert!(filter_episodes(catalog.episodes(), range, "99").is_empty());
        assert!(filter_episodes(catalog.episodes(), range, "x").is_empty());
    }

    #[test]
    fn test_catalog_buckets() {
        let catalog = EpisodeCatalog::new(100, 20);
        let labels: Vec<String> = catalog.ranges().iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["1-20", "21-40", "41-60", "61-80", "81-100"]);

        let uneven = EpisodeCatalog::new(45, 20);
        assert_eq!(uneven.ranges().last(), Some(&EpisodeRange::new(41, 45)));

        let empty = EpisodeCatalog::new(0, 20);
        assert!(empty.ranges().is_empty());
    }

    #[test]
    fn test_parse_range_label() {
        assert_eq!(
            "81-100".parse::<EpisodeRange>().unwrap(),
            EpisodeRange::new(81, 100)
        );
        assert!("81".parse::<EpisodeRange>().is_err());
        assert!("a-b".parse::<EpisodeRange>().is_err());
        assert!("40-21".parse::<EpisodeRange>().is_err());
    }

    #[test]
    fn test_filter_state_tracks_selection() {
        let catalog = EpisodeCatalog::new(100, 20);
        let mut state = EpisodeFilterState::new(&catalog);
        assert_eq!(state.active_range.label(), "1-20");
        assert_eq!(state.active_episode, 1);

        state.select_range(EpisodeRange::new(61, 80));
        state.search_term = "7".to_string();
        assert_eq!(
            state.filtered(&catalog),
            vec![67, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79]
        );

        state.select_episode(67);
        assert_eq!(state.active_episode, 67);
    }
}
