#[cfg(test)]
mod tests {
    use shared::{LOAD_TIMEOUT, LoadOutcome, LoadingState, PreloadCoordinator, Ready, preload_all};

    #[test]
    fn test_readiness_fires_exactly_once_with_failures() {
        let mut coordinator = PreloadCoordinator::new();
        let plan = coordinator.start(1..=6u32);
        assert_eq!(plan.requests.len(), 6);

        let mut fired = Vec::new();
        for key in [3, 1, 6, 2, 5, 4] {
            let outcome = if key % 3 == 0 {
                LoadOutcome::Failed("decode error".into())
            } else {
                LoadOutcome::Loaded
            };
            if let Some(ready) = coordinator.settle(&key, outcome) {
                fired.push(ready);
            }
        }

        // Late duplicates after readiness never fire again
        assert_eq!(coordinator.settle(&4, LoadOutcome::Loaded), None);

        assert_eq!(
            fired,
            vec![Ready {
                total: 6,
                loaded: 4,
                failed: 2
            }]
        );
        assert!(coordinator.is_ready());
        assert!(matches!(
            coordinator.state(&6),
            Some(LoadingState::Failed(_))
        ));
    }

    #[test]
    fn test_all_failed_still_ready() {
        let mut coordinator = PreloadCoordinator::new();
        coordinator.start(["a", "b"]);
        coordinator.settle(&"a", LoadOutcome::Failed("x".into()));
        let ready = coordinator.settle(&"b", LoadOutcome::Failed("y".into()));
        assert_eq!(ready.map(|r| r.failed), Some(2));
    }

    #[test]
    fn test_not_ready_while_any_slot_pending() {
        let mut coordinator = PreloadCoordinator::new();
        coordinator.start([1, 2, 3]);
        coordinator.settle(&1, LoadOutcome::Loaded);
        coordinator.settle(&2, LoadOutcome::Loaded);
        assert!(!coordinator.is_ready());
        assert_eq!(coordinator.progress(), (2, 3));
        assert_eq!(coordinator.state(&3), Some(&LoadingState::Pending));
    }

    #[tokio::test]
    async fn test_preload_all_counts_panics_as_failed() {
        let ready = preload_all(vec![1u8, 2, 3], LOAD_TIMEOUT, |key| async move {
            if key == 2 {
                panic!("loader blew up");
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

    #[tokio::test]
    async fn test_preload_all_empty_batch() {
        let ready = preload_all(Vec::<u8>::new(), LOAD_TIMEOUT, |_| async { LoadOutcome::Loaded }).await;
        assert_eq!(ready.total, 0);
    }
}
