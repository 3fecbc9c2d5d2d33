//! Frontier queue and politeness throttling
//!
//! This module handles:
//! - The FIFO frontier of URLs waiting to be visited
//! - Rejecting URLs that are already queued
//! - Spacing successive network fetches by a minimum delay

use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL as discovered, possibly non-normalized
    pub url: String,

    /// Link distance from the nearest seed
    pub depth: u32,
}

/// Breadth-first frontier
///
/// Entries are visited strictly in insertion order. The frontier also tracks
/// which original URL strings are currently queued so the same link is not
/// queued twice.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    queued: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding every seed at depth 0
    ///
    /// Seeds are queued unconditionally; duplicates among them are resolved
    /// by the engine's visited set when popped.
    pub fn with_seeds<S: AsRef<str>>(seeds: &[S]) -> Self {
        let mut frontier = Self::default();
        for seed in seeds {
            let url = seed.as_ref().trim().to_string();
            frontier.queued.insert(url.clone());
            frontier.queue.push_back(FrontierEntry { url, depth: 0 });
        }
        frontier
    }

    /// Queues a URL unless the same URL string is already waiting
    ///
    /// # Returns
    ///
    /// * `true` - The URL was queued
    /// * `false` - The URL was already in the frontier
    pub fn push(&mut self, url: String, depth: u32) -> bool {
        if !self.queued.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(FrontierEntry { url, depth });
        true
    }

    /// Removes and returns the oldest entry
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop_front()?;
        self.queued.remove(&entry.url);
        Some(entry)
    }

    /// Returns whether a URL string is currently queued
    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    /// Returns the number of queued entries
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Enforces a minimum spacing between network fetches
#[derive(Debug)]
pub struct Throttle {
    delay: Duration,
    last_fetch: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_fetch: None,
        }
    }

    /// Returns how long the next fetch must wait, if at all
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let ready_at = self.last_fetch? + self.delay;
        (ready_at > now).then(|| ready_at - now)
    }

    /// Sleeps until the delay since the last recorded fetch has elapsed
    pub async fn wait(&self) {
        if let Some(wait) = self.time_until_ready(Instant::now()) {
            tracing::trace!("Politeness delay: waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records a completed fetch
    pub fn record_fetch(&mut self) {
        self.last_fetch = Some(Instant::now());
    }
}
