//! One-shot readiness gate over a batch of image loads.
//!
//! The coordinator only counts outcomes. A failed load settles its slot the
//! same way a successful one does, so readiness fires once every request has
//! settled, whatever the mix of results.

use std::{collections::HashMap, future::Future, hash::Hash, time::Duration};

use tokio::task::JoinSet;

use crate::loading_state::{LoadingEvent, LoadingState};

/// Deadline after which a load that has not reported back counts as failed.
pub const LOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Result of a single load request as seen by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

impl LoadOutcome {
    fn into_event(self) -> LoadingEvent {
        match self {
            LoadOutcome::Loaded => LoadingEvent::LoadComplete,
            LoadOutcome::Failed(msg) => LoadingEvent::LoadError(msg),
        }
    }
}

/// Summary handed out on the `false -> true` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready {
    pub total: usize,
    pub loaded: usize,
    pub failed: usize,
}

/// Requests the caller must issue, plus the readiness summary when the batch
/// was empty and the gate opened immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadPlan<K> {
    pub requests: Vec<K>,
    pub ready: Option<Ready>,
}

impl<K> PreloadPlan<K> {
    fn empty() -> Self {
        Self {
            requests: Vec::new(),
            ready: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreloadCoordinator<K> {
    slots: HashMap<K, LoadingState>,
    order: Vec<K>,
    loaded: usize,
    failed: usize,
    started: bool,
    ready: bool,
}

impl<K: Eq + Hash + Clone> PreloadCoordinator<K> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            order: Vec::new(),
            loaded: 0,
            failed: 0,
            started: false,
            ready: false,
        }
    }

    /// Registers the batch and returns the loads to issue. Duplicate keys are
    /// requested once. Calling `start` a second time is a no-op.
    pub fn start<I>(&mut self, keys: I) -> PreloadPlan<K>
    where
        I: IntoIterator<Item = K>,
    {
        if self.started {
            return PreloadPlan::empty();
        }
        self.started = true;

        for key in keys {
            if self.slots.contains_key(&key) {
                continue;
            }
            self.slots.insert(key.clone(), LoadingState::Pending);
            self.order.push(key);
        }

        let ready = if self.order.is_empty() {
            self.open_gate()
        } else {
            None
        };

        PreloadPlan {
            requests: self.order.clone(),
            ready,
        }
    }

    /// Records the outcome of one request. Returns the summary exactly once,
    /// on the call that settles the last pending slot. Unknown keys and
    /// repeated outcomes for a settled key are ignored.
    pub fn settle(&mut self, key: &K, outcome: LoadOutcome) -> Option<Ready> {
        if self.ready {
            return None;
        }

        let slot = self.slots.get_mut(key)?;
        if slot.is_settled() {
            return None;
        }

        let state = outcome.into_event().apply_to_state(std::mem::take(slot));
        match state {
            LoadingState::Loaded => self.loaded += 1,
            LoadingState::Failed(_) => self.failed += 1,
            LoadingState::Pending => {}
        }
        *slot = state;

        if self.loaded + self.failed == self.order.len() {
            self.open_gate()
        } else {
            None
        }
    }

    fn open_gate(&mut self) -> Option<Ready> {
        self.ready = true;
        let ready = self.summary();
        tracing::info!(
            "Preload ready: {} loaded, {} failed of {}",
            ready.loaded,
            ready.failed,
            ready.total
        );
        Some(ready)
    }

    pub fn summary(&self) -> Ready {
        Ready {
            total: self.order.len(),
            loaded: self.loaded,
            failed: self.failed,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// `(settled, total)`
    pub fn progress(&self) -> (usize, usize) {
        (self.loaded + self.failed, self.order.len())
    }

    pub fn state(&self, key: &K) -> Option<&LoadingState> {
        self.slots.get(key)
    }
}

impl<K: Eq + Hash + Clone> Default for PreloadCoordinator<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every load concurrently and waits for all of them to settle.
///
/// A load that panics, or that is still running after `limit`, counts as
/// failed. The returned summary is the one the coordinator fires on its
/// readiness transition.
pub async fn preload_all<K, F, Fut>(keys: Vec<K>, limit: Duration, load: F) -> Ready
where
    K: Eq + Hash + Clone + Send + 'static,
    F: Fn(K) -> Fut,
    Fut: Future<Output = LoadOutcome> + Send + 'static,
{
    let mut coordinator = PreloadCoordinator::new();
    let plan = coordinator.start(keys);
    if let Some(ready) = plan.ready {
        return ready;
    }

    let mut set = JoinSet::new();
    for key in plan.requests {
        let mut handle = tokio::spawn(load(key.clone()));
        set.spawn(async move {
            let outcome = match tokio::time::timeout(limit, &mut handle).await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => LoadOutcome::Failed(e.to_string()),
                Err(_) => {
                    handle.abort();
                    LoadOutcome::Failed(format!("timed out after {limit:?}"))
                }
            };
            (key, outcome)
        });
    }

    let mut ready = None;
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((key, outcome)) => {
                if let Some(summary) = coordinator.settle(&key, outcome) {
                    ready = Some(summary);
                }
            }
            Err(e) => tracing::warn!("Preload task failed to join: {e}"),
        }
    }

    // Slots whose task never reported back count as failed
    ready.unwrap_or_else(|| {
        let summary = coordinator.summary();
        Ready {
            failed: summary.total - summary.loaded,
            ..summary
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requests_each_key_once() {
        let mut coordinator = PreloadCoordinator::new();
        let plan = coordinator.start(vec![1, 2, 2, 3]);
        assert_eq!(plan.requests, vec![1, 2, 3]);
        assert_eq!(plan.ready, None);
        assert_eq!(coordinator.progress(), (0, 3));
        assert!(!coordinator.is_ready());
    }

    #[test]
    fn test_empty_batch_is_ready_immediately() {
        let mut coordinator: PreloadCoordinator<u32> = PreloadCoordinator::new();
        let plan = coordinator.start(Vec::new());
        assert!(plan.requests.is_empty());
        assert_eq!(
            plan.ready,
            Some(Ready {
                total: 0,
                loaded: 0,
                failed: 0
            })
        );
        assert!(coordinator.is_ready());
    }

    #[test]
    fn test_failure_counts_towards_readiness() {
        let mut coordinator = PreloadCoordinator::new();
        coordinator.start(vec!["a", "b"]);

        assert_eq!(coordinator.settle(&"a", LoadOutcome::Loaded), None);
        let ready = coordinator.settle(&"b", LoadOutcome::Failed("404".into()));

        assert_eq!(
            ready,
            Some(Ready {
                total: 2,
                loaded: 1,
                failed: 1
            })
        );
        assert_eq!(
            coordinator.state(&"b"),
            Some(&LoadingState::Failed("404".into()))
        );
    }

    #[test]
    fn test_duplicate_and_unknown_outcomes_are_ignored() {
        let mut coordinator = PreloadCoordinator::new();
        coordinator.start(vec![1, 2]);

        assert_eq!(coordinator.settle(&1, LoadOutcome::Loaded), None);
        assert_eq!(coordinator.settle(&1, LoadOutcome::Loaded), None);
        assert_eq!(coordinator.settle(&9, LoadOutcome::Loaded), None);
        assert_eq!(coordinator.progress(), (1, 2));
        assert!(!coordinator.is_ready());
    }

    #[test]
    fn test_second_start_is_ignored() {
        let mut coordinator = PreloadCoordinator::new();
        coordinator.start(vec![1]);
        coordinator.settle(&1, LoadOutcome::Loaded);

        let plan = coordinator.start(vec![2, 3]);
        assert!(plan.requests.is_empty());
        assert_eq!(plan.ready, None);
        assert_eq!(coordinator.progress(), (1, 1));
    }

    #[tokio::test]
    async fn test_preload_all_settles_everything() {
        let ready = preload_all(vec![1u32, 2, 3, 4], LOAD_TIMEOUT, |key| async move {
            if key % 2 == 0 {
                LoadOutcome::Failed(format!("missing {key}"))
            } else {
                LoadOutcome::Loaded
            }
        })
        .await;

        assert_eq!(
            ready,
            Ready {
                total: 4,
                loaded: 2,
                failed: 2
            }
        );
    }

    #[tokio::test]
    async fn test_preload_all_times_out_stuck_load() {
        let ready = preload_all(vec![1u32, 2, 3], Duration::from_millis(50), |key| async move {
            if key == 3 {
                std::future::pending::<()>().await;
            }
            LoadOutcome::Loaded
        })
        .await;

        assert_eq!(
            ready,
            Ready {
                total: 3,
                loaded: 2,
                failed: 1
            }
        );
    }
}
