//! Poll cycle coordinator

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use matchwatch_core::{
    build_dispatches, classify, classify_fragment, normalize_page, render_status, Category,
    Dispatch, Extractor, MatchHistory, NotFoundThrottle, PageState, PlayerOutcome, TrackedPlayer,
    WatchConfig,
};
use matchwatch_telemetry::{save_response, Journal, NotificationRecord, Paths};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::fetcher::{FetchError, PageFetcher};
use crate::notifier::Notifier;

/// Summary of one poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub players: usize,
    pub new_matches: usize,
    pub duplicates: usize,
    pub not_found: usize,
    pub not_found_suppressed: usize,
    pub inactive: usize,
    pub unknown: usize,
    pub extraction_failures: usize,
    pub failures: usize,
    /// Messages accepted by the notifier
    pub dispatched: usize,
    pub delivery_failures: usize,
    /// History records dropped by the end-of-cycle eviction
    pub evicted: usize,
    /// Per-player outcomes in roster order
    pub outcomes: Vec<PlayerOutcome>,
}

impl CycleReport {
    fn new(started_at: DateTime<Utc>, outcomes: Vec<PlayerOutcome>) -> Self {
        let mut report = Self {
            started_at,
            players: outcomes.len(),
            new_matches: 0,
            duplicates: 0,
            not_found: 0,
            not_found_suppressed: 0,
            inactive: 0,
            unknown: 0,
            extraction_failures: 0,
            failures: 0,
            dispatched: 0,
            delivery_failures: 0,
            evicted: 0,
            outcomes: Vec::new(),
        };

        for outcome in &outcomes {
            match outcome {
                PlayerOutcome::NewMatch(_) => report.new_matches += 1,
                PlayerOutcome::Duplicate { .. } => report.duplicates += 1,
                PlayerOutcome::NotFound { .. } => report.not_found += 1,
                PlayerOutcome::NotFoundSuppressed { .. } => report.not_found_suppressed += 1,
                PlayerOutcome::Inactive { .. } => report.inactive += 1,
                PlayerOutcome::Unknown { .. } => report.unknown += 1,
                PlayerOutcome::ExtractionFailed { .. } => report.extraction_failures += 1,
                PlayerOutcome::Failed { .. } => report.failures += 1,
            }
        }
        report.outcomes = outcomes;
        report
    }
}

/// Drives classify, extract and dedup for every tracked player, then groups
/// and delivers the cycle's alerts.
///
/// History and throttle are the only state shared between concurrent player
/// checks. Each check-then-update runs under one lock acquisition, and no lock
/// is held across an await point.
pub struct Watcher<F, N> {
    config: WatchConfig,
    extractor: Extractor,
    fetcher: F,
    notifier: N,
    history: Mutex<MatchHistory>,
    throttle: Mutex<NotFoundThrottle>,
    paths: Option<Paths>,
}

impl<F: PageFetcher, N: Notifier> Watcher<F, N> {
    pub fn new(config: WatchConfig, fetcher: F, notifier: N) -> Self {
        let extractor = Extractor::new(&config.region);
        let history = MatchHistory::new(config.history_capacity, config.history_ttl());
        let throttle = NotFoundThrottle::new(config.not_found_cooldown());

        Self {
            config,
            extractor,
            fetcher,
            notifier,
            history: Mutex::new(history),
            throttle: Mutex::new(throttle),
            paths: None,
        }
    }

    /// Journal dispatched messages and dump raw responses under `paths`
    pub fn with_paths(mut self, paths: Paths) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Snapshot of the match history
    pub fn history(&self) -> MatchHistory {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Post the status line once to every distinct configured channel
    pub async fn announce(&self, now: DateTime<Utc>) -> usize {
        let content = render_status(now, self.config.players.len());
        let mut seen = BTreeSet::new();
        let mut delivered = 0;

        for category in Category::ALL {
            let Some(channel) = self.config.channel(category) else {
                continue;
            };
            if !seen.insert(channel) {
                continue;
            }
            if self.deliver(category, channel, &content, 0, now).await {
                delivered += 1;
            }
        }
        delivered
    }

    pub async fn run_cycle(&self) -> CycleReport {
        self.run_cycle_at(Utc::now()).await
    }

    /// One full cycle observed at `now`: check every player, then group,
    /// deliver, and evict once all checks have finished.
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> CycleReport {
        let concurrency = self.config.max_concurrency.max(1);

        let mut indexed: Vec<(usize, PlayerOutcome)> =
            stream::iter(self.config.players.iter().enumerate())
                .map(|(index, player)| async move { (index, self.check_player(player, now).await) })
                .buffer_unordered(concurrency)
                .collect()
                .await;
        indexed.sort_by_key(|(index, _)| *index);

        let outcomes: Vec<PlayerOutcome> = indexed.into_iter().map(|(_, outcome)| outcome).collect();
        let mut report = CycleReport::new(now, outcomes);

        let dispatches = build_dispatches(&report.outcomes, &self.config, now, self.config.notify_errors);
        for dispatch in &dispatches {
            if self.dispatch(dispatch, now).await {
                report.dispatched += 1;
            } else {
                report.delivery_failures += 1;
            }
        }

        report.evicted = self
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .evict_stale(now);
        let pruned = self
            .throttle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .prune(now);

        info!(
            players = report.players,
            new_matches = report.new_matches,
            duplicates = report.duplicates,
            not_found = report.not_found,
            failures = report.failures,
            dispatched = report.dispatched,
            evicted = report.evicted,
            pruned,
            "Cycle complete"
        );
        report
    }

    async fn check_player(&self, player: &TrackedPlayer, now: DateTime<Utc>) -> PlayerOutcome {
        let url = self.config.live_url(player);

        let mut raw = match self.fetch(&url).await {
            Ok(raw) => raw,
            Err(err) => return self.failed(player, &url, err, now),
        };
        // Page the state was read from; dumps point at it
        let mut source_url = url.clone();
        let mut text = normalize_page(&raw);
        let mut state = classify(&text);

        if state == PageState::Loading {
            let fragment_url = self.config.fragment_url(player);
            debug!(player = %player.name, "Live page still loading, fetching fragment");
            raw = match self.fetch(&fragment_url).await {
                Ok(fragment) => fragment,
                Err(err) => return self.failed(player, &fragment_url, err, now),
            };
            source_url = fragment_url;
            text = normalize_page(&raw);
            state = classify_fragment(&text);
        }

        debug!(player = %player.name, ?state, "Page classified");
        let name = player.name.clone();

        match state {
            PageState::NotFound => {
                let notify = self
                    .throttle
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .should_notify(&player.name, now);
                if notify {
                    info!(player = %name, "Summoner not found");
                    PlayerOutcome::NotFound { player: name }
                } else {
                    debug!(player = %name, "Summoner not found, alert suppressed");
                    PlayerOutcome::NotFoundSuppressed { player: name }
                }
            }
            PageState::Inactive => PlayerOutcome::Inactive { player: name },
            PageState::Unknown | PageState::Loading => {
                warn!(player = %name, "Page matched no known state");
                self.dump(player, &source_url, "UNKNOWN", &raw, now);
                PlayerOutcome::Unknown { player: name }
            }
            PageState::Active => match self.extractor.extract(&text, player, &url, now) {
                Ok(record) => {
                    let match_id = record.match_id.clone();
                    let is_new = self
                        .history
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .observe(record.clone());
                    if is_new {
                        info!(player = %name, match_id = %match_id, queue = %record.queue, "New match");
                        PlayerOutcome::NewMatch(record)
                    } else {
                        debug!(player = %name, match_id = %match_id, "Match already notified");
                        PlayerOutcome::Duplicate {
                            player: name,
                            match_id,
                        }
                    }
                }
                Err(err) => {
                    warn!(player = %name, error = %err, "Active page without a readable match");
                    self.dump(player, &source_url, "EXTRACT", &raw, now);
                    PlayerOutcome::ExtractionFailed {
                        player: name,
                        reason: err.to_string(),
                    }
                }
            },
        }
    }

    /// Fetch bounded by the configured deadline, retries included
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match tokio::time::timeout(self.config.fetch_deadline(), self.fetcher.fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    fn failed(
        &self,
        player: &TrackedPlayer,
        url: &str,
        err: FetchError,
        now: DateTime<Utc>,
    ) -> PlayerOutcome {
        warn!(player = %player.name, error = %err, "Player check failed");
        self.dump(player, url, "ERROR", &err.to_string(), now);
        PlayerOutcome::Failed {
            player: player.name.clone(),
            error: err.to_string(),
        }
    }

    fn dump(
        &self,
        player: &TrackedPlayer,
        url: &str,
        label: &str,
        content: &str,
        now: DateTime<Utc>,
    ) {
        if !self.config.log_responses {
            return;
        }
        let Some(paths) = &self.paths else {
            return;
        };
        let dir = paths.responses_dir();
        match save_response(&dir, &player.slug(), url, label, content, now) {
            Ok(path) => debug!(path = %path.display(), "Response saved"),
            Err(err) => warn!(error = %err, "Failed to save response"),
        }
    }

    async fn dispatch(&self, dispatch: &Dispatch, now: DateTime<Utc>) -> bool {
        let Some(channel) = self.config.channel(dispatch.category) else {
            warn!(category = %dispatch.category, "No channel configured, alert dropped");
            return false;
        };
        self.deliver(dispatch.category, channel, &dispatch.content, dispatch.sections, now)
            .await
    }

    async fn deliver(
        &self,
        category: Category,
        channel: &str,
        content: &str,
        sections: usize,
        now: DateTime<Utc>,
    ) -> bool {
        let result = self.notifier.send(channel, content).await;
        let error = match &result {
            Ok(()) => {
                debug!(category = %category, sections, "Notification sent");
                None
            }
            Err(err) => {
                warn!(category = %category, error = %err, "Notification failed");
                Some(err.to_string())
            }
        };

        if let Some(paths) = &self.paths {
            let record = NotificationRecord {
                sent_at: now,
                category: category.as_str().to_string(),
                sections,
                delivered: error.is_none(),
                error,
                content: content.to_string(),
            };
            if let Err(err) = Journal::new(paths.journal_file()).append(&record) {
                warn!(error = %err, "Failed to journal notification");
            }
        }

        result.is_ok()
    }
}
