//! Preloaded event lists, one per feed window.

use crate::{
    core::config::HeaderPolicy,
    data::feed::{parse_feed, EarthquakeEvent, FeedReport},
    prelude::HashMap,
    tiles::{loader::ResourceLoader, source::FeedSource},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time span covered by one summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedWindow {
    Hour,
    Day,
    Week,
    Month,
}

impl FeedWindow {
    pub const ALL: [FeedWindow; 4] = [Self::Hour, Self::Day, Self::Week, Self::Month];

    /// File name of the summary feed for this window.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Hour => "all_hour.csv",
            Self::Day => "all_day.csv",
            Self::Week => "all_week.csv",
            Self::Month => "all_month.csv",
        }
    }
}

impl std::fmt::Display for FeedWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hour => write!(f, "hour"),
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl FromStr for FeedWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" | "7days" => Ok(Self::Week),
            "month" | "30days" => Ok(Self::Month),
            other => Err(format!("unknown feed window '{}' (hour, day, week, month)", other)),
        }
    }
}

/// Fetches and parses one feed.
pub fn load_feed(loader: &ResourceLoader, location: &str, header: HeaderPolicy) -> Result<FeedReport> {
    let text = loader.fetch_text(location)?;
    Ok(parse_feed(&text, header))
}

/// Windows that failed to load during a preload.
pub type PreloadFailures = Vec<(FeedWindow, MapError)>;

/// Event lists by window. Loaded once, then only read by render passes.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: HashMap<FeedWindow, Vec<EarthquakeEvent>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, window: FeedWindow, events: Vec<EarthquakeEvent>) {
        log::debug!("dataset {} holds {} events", window, events.len());
        self.datasets.insert(window, events);
    }

    /// Events for `window`; empty when the window was never loaded.
    pub fn get(&self, window: FeedWindow) -> &[EarthquakeEvent] {
        self.datasets
            .get(&window)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, window: FeedWindow) -> bool {
        self.datasets.contains_key(&window)
    }

    /// Loaded windows, in window order.
    pub fn windows(&self) -> Vec<FeedWindow> {
        let mut windows: Vec<FeedWindow> = self.datasets.keys().copied().collect();
        windows.sort();
        windows
    }

    pub fn total_events(&self) -> usize {
        self.datasets.values().map(Vec::len).sum()
    }

    fn collect(results: Vec<(FeedWindow, Result<FeedReport>)>) -> (Self, PreloadFailures) {
        let mut store = Self::new();
        let mut failures = Vec::new();
        for (window, result) in results {
            match result {
                Ok(report) => store.insert(window, report.events),
                Err(e) => {
                    log::error!("failed to preload {} feed: {}", window, e);
                    failures.push((window, e));
                }
            }
        }
        (store, failures)
    }

    /// Loads all four windows one after another.
    pub fn preload(
        loader: &ResourceLoader,
        source: &FeedSource,
        header: HeaderPolicy,
    ) -> (Self, PreloadFailures) {
        let results = FeedWindow::ALL
            .iter()
            .map(|&window| (window, load_feed(loader, &source.url(window), header)))
            .collect();
        Self::collect(results)
    }

    /// Loads all four windows concurrently on the blocking pool.
    #[cfg(feature = "tokio-runtime")]
    pub async fn preload_async(
        loader: ResourceLoader,
        source: FeedSource,
        header: HeaderPolicy,
    ) -> (Self, PreloadFailures) {
        let tasks = FeedWindow::ALL.iter().map(|&window| {
            let loader = loader.clone();
            let location = source.url(window);
            tokio::task::spawn_blocking(move || (window, load_feed(&loader, &location, header)))
        });

        let mut results = Vec::with_capacity(FeedWindow::ALL.len());
        for joined in futures::future::join_all(tasks).await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => log::error!("feed task did not complete: {}", e),
            }
        }
        Self::collect(results)
    }
}
