#[cfg(test)]
mod tests {
    use gallery_nav::{Gallery, GestureSettings, Phase};
    use gallery_types::{PhotoCatalog, PhotoId};
    use shared::{GridCellConfiguration, LoadOutcome};
    use std::time::{Duration, Instant};

    fn gallery() -> Gallery {
        let catalog = PhotoCatalog::from_sources((1..=6).map(|n| {
            (
                format!("/images/photo{n}.jpg"),
                format!("/images/photo{n}.jpg"),
                format!("婚纱照{n}"),
            )
        }))
        .expect("valid catalog");
        Gallery::new(
            catalog,
            GestureSettings::default(),
            GridCellConfiguration::default(),
        )
    }

    fn ready_gallery() -> Gallery {
        let mut gallery = gallery();
        let plan = gallery.start_preload();
        for id in plan.requests {
            gallery.thumbnail_settled(id, LoadOutcome::Loaded);
        }
        assert!(gallery.is_ready());
        gallery
    }

    #[test]
    fn test_selection_waits_for_readiness() {
        let mut gallery = gallery();
        let plan = gallery.start_preload();
        assert_eq!(plan.requests.len(), 6);

        assert_eq!(gallery.select(PhotoId(2)), None);
        assert!(!gallery.overlay().is_open());
        assert!(gallery.cells().iter().all(|cell| !cell.interactive));

        for id in plan.requests {
            gallery.thumbnail_settled(id, LoadOutcome::Loaded);
        }
        assert_eq!(gallery.select(PhotoId(2)), Some(1));
        assert_eq!(gallery.current_photo().map(|p| p.label()), Some("婚纱照2"));
    }

    #[test]
    fn test_readiness_fires_once_despite_failures() {
        let mut gallery = gallery();
        let plan = gallery.start_preload();
        let mut fired = 0;

        for (n, id) in plan.requests.iter().enumerate() {
            let outcome = if n % 2 == 0 {
                LoadOutcome::Failed("404".to_string())
            } else {
                LoadOutcome::Loaded
            };
            if gallery.thumbnail_settled(*id, outcome).is_some() {
                fired += 1;
            }
            // Late duplicates must not fire again.
            if gallery.thumbnail_settled(*id, LoadOutcome::Loaded).is_some() {
                fired += 1;
            }
        }

        assert_eq!(fired, 1);
        assert!(gallery.is_ready());
        assert!(gallery.thumbnail_failed(PhotoId(1)));
        assert!(!gallery.thumbnail_failed(PhotoId(2)));
        assert_eq!(gallery.preload_progress(), (6, 6));
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut fresh = ready_gallery();
        fresh.select_index(3);
        let fresh_state = fresh.overlay().carousel().map(|c| c.state());

        let mut gallery = ready_gallery();
        gallery.select_index(3);
        let t0 = Instant::now();
        gallery.pointer_down(200.0, t0);
        gallery.pointer_move(150.0);
        assert!(gallery.close_preview());
        assert!(!gallery.overlay().is_open());

        gallery.select(PhotoId(4));
        let state = gallery.overlay().carousel().map(|c| c.state());
        assert_eq!(state, fresh_state);
        assert_eq!(state.map(|s| s.phase), Some(Phase::Idle));
        assert_eq!(state.map(|s| s.drag_offset), Some(0.0));
    }

    #[test]
    fn test_pointer_events_without_preview_are_ignored() {
        let mut gallery = ready_gallery();
        let t0 = Instant::now();
        assert!(!gallery.pointer_down(10.0, t0));
        assert_eq!(gallery.pointer_move(20.0), None);
        assert_eq!(gallery.pointer_up(20.0, t0 + Duration::from_millis(30)), None);
        assert!(gallery.visible_layers().is_empty());
        assert!(!gallery.close_preview());
    }

    #[test]
    fn test_visible_layers_pair_with_photos() {
        let mut gallery = ready_gallery();
        gallery.select_index(0);
        let layers = gallery.visible_layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].1.id(), PhotoId(2));
        assert_eq!(layers[1].1.id(), PhotoId(1));
    }

    #[test]
    fn test_indicator_tap_through_gallery() {
        let mut gallery = ready_gallery();
        gallery.select_index(0);
        gallery.jump_to(3);
        assert_eq!(gallery.overlay().current_index(), Some(3));
        assert_eq!(gallery.current_photo().map(|p| p.id()), Some(PhotoId(4)));
    }

    #[test]
    fn test_timed_out_thumbnail_unblocks_grid() {
        let mut gallery = gallery();
        let plan = gallery.start_preload();
        let (stuck, rest) = plan.requests.split_last().expect("six photos");

        for id in rest {
            gallery.thumbnail_settled(*id, LoadOutcome::Loaded);
        }
        // One load still in flight keeps the grid inert
        assert!(!gallery.is_ready());
        assert_eq!(gallery.preload_progress(), (5, 6));
        assert_eq!(gallery.select(PhotoId(2)), None);

        // Its deadline expires and the loader reports a failure
        let ready = gallery.thumbnail_settled(*stuck, LoadOutcome::Failed("timed out".to_string()));
        assert_eq!(ready.map(|r| (r.loaded, r.failed)), Some((5, 1)));
        assert!(gallery.thumbnail_failed(*stuck));
        assert_eq!(gallery.select(PhotoId(2)), Some(1));
    }
}
