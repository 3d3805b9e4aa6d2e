#[cfg(test)]
mod tests {
    use gallery_config::CommitPolicy;
    use gallery_nav::{
        CarouselEvent, Direction, GestureCarousel, GestureOutcome, GestureSettings, LayerRole, Phase,
        SnapReason, TickOutcome,
    };
    use std::time::{Duration, Instant};

    const WIDTH: f32 = 400.0;

    fn carousel(index: usize) -> GestureCarousel {
        GestureCarousel::new(6, index, WIDTH, GestureSettings::default()).expect("valid index")
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drives the running animation past its end and returns the final event.
    fn settle(carousel: &mut GestureCarousel, now: Instant) -> Option<CarouselEvent> {
        carousel.tick(now + ms(1000))
    }

    #[test]
    fn test_neighbours_never_leave_catalog() {
        for len in 1..=6 {
            for index in 0..len {
                let carousel = GestureCarousel::new(len, index, WIDTH, GestureSettings::default())
                    .expect("valid index");
                for offset in [-250.0, 0.0, 250.0] {
                    let layers = gallery_nav::layers::compose(index, len, offset, WIDTH);
                    assert!(layers.iter().all(|layer| layer.index < len));
                }
                assert!(carousel.layers().iter().all(|layer| layer.index < len));
            }
        }
    }

    #[test]
    fn test_drag_offset_tracks_pointer_exactly() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        assert!(carousel.pointer_down(200.0, t0));
        assert_eq!(carousel.phase(), Phase::Dragging);

        for x in [190.0, 150.0, 260.0, 201.5, 13.0] {
            assert_eq!(carousel.pointer_move(x), Some(x - 200.0));
            assert_eq!(carousel.drag_offset(), x - 200.0);
        }
    }

    #[test]
    fn test_drag_moves_neighbours_with_current() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        carousel.pointer_down(200.0, t0);
        carousel.pointer_move(170.0);

        for layer in carousel.layers() {
            let expected = match layer.role {
                LayerRole::Previous => -WIDTH - 30.0,
                LayerRole::Current => -30.0,
                LayerRole::Next => WIDTH - 30.0,
            };
            assert_eq!(layer.translate_x, expected);
        }
    }

    #[test]
    fn test_long_drag_commits_forward() {
        let mut carousel = carousel(0);
        let t0 = Instant::now();
        carousel.pointer_down(300.0, t0);
        carousel.pointer_move(260.0);
        let outcome = carousel.pointer_up(240.0, t0 + ms(100));

        assert_eq!(outcome, Some(GestureOutcome::Commit(Direction::Forward)));
        assert_eq!(carousel.phase(), Phase::AnimatingCommit(Direction::Forward));
        assert_eq!(carousel.pending_direction(), Some(Direction::Forward));
        assert_eq!(carousel.current_index(), 0);

        let event = settle(&mut carousel, t0 + ms(100));
        assert_eq!(event, Some(CarouselEvent::IndexChanged { from: 0, to: 1 }));
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.drag_offset(), 0.0);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert_eq!(carousel.pending_direction(), None);
    }

    #[test]
    fn test_fast_flick_commits_backward() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        carousel.pointer_down(100.0, t0);
        carousel.pointer_move(130.0);
        let outcome = carousel.pointer_up(130.0, t0 + ms(50));

        assert_eq!(outcome, Some(GestureOutcome::Commit(Direction::Backward)));
        settle(&mut carousel, t0 + ms(50));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_fast_flick_snaps_back_with_distance_policy() {
        let settings = GestureSettings::default().with_policy(CommitPolicy::DistanceOnly);
        let mut carousel = GestureCarousel::new(6, 2, WIDTH, settings).expect("valid index");
        let t0 = Instant::now();
        carousel.pointer_down(100.0, t0);
        let outcome = carousel.pointer_up(130.0, t0 + ms(50));

        assert_eq!(
            outcome,
            Some(GestureOutcome::SnapBack(SnapReason::BelowThreshold))
        );
        assert_eq!(
            settle(&mut carousel, t0 + ms(50)),
            Some(CarouselEvent::Settled)
        );
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_boundary_commit_snaps_back() {
        let mut carousel = carousel(5);
        let t0 = Instant::now();
        carousel.pointer_down(300.0, t0);
        carousel.pointer_move(240.0);
        assert!(carousel.layers().iter().all(|l| l.role != LayerRole::Next));

        let outcome = carousel.pointer_up(240.0, t0 + ms(100));
        assert_eq!(outcome, Some(GestureOutcome::SnapBack(SnapReason::Boundary)));
        assert_eq!(carousel.phase(), Phase::AnimatingSnapBack);

        assert_eq!(
            settle(&mut carousel, t0 + ms(100)),
            Some(CarouselEvent::Settled)
        );
        assert_eq!(carousel.current_index(), 5);
        assert_eq!(carousel.drag_offset(), 0.0);
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn test_first_photo_cannot_go_backward() {
        let mut carousel = carousel(0);
        let t0 = Instant::now();
        carousel.pointer_down(0.0, t0);
        let outcome = carousel.pointer_up(120.0, t0 + ms(100));
        assert_eq!(outcome, Some(GestureOutcome::SnapBack(SnapReason::Boundary)));
        settle(&mut carousel, t0 + ms(100));
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_zero_delta_never_commits() {
        let mut carousel = carousel(3);
        let t0 = Instant::now();
        carousel.pointer_down(100.0, t0);
        let outcome = carousel.pointer_up(100.0, t0);
        assert_eq!(
            outcome,
            Some(GestureOutcome::SnapBack(SnapReason::BelowThreshold))
        );
    }

    #[test]
    fn test_indicator_jump_skips_animation() {
        let mut carousel = carousel(0);
        assert_eq!(
            carousel.jump_to(3),
            Some(CarouselEvent::IndexChanged { from: 0, to: 3 })
        );
        assert_eq!(carousel.current_index(), 3);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert!(!carousel.is_animating());
        assert_eq!(carousel.jump_to(3), None);
        assert_eq!(carousel.jump_to(6), None);
    }

    #[test]
    fn test_jump_cancels_running_animation() {
        let mut carousel = carousel(1);
        let t0 = Instant::now();
        carousel.pointer_down(300.0, t0);
        carousel.pointer_up(200.0, t0 + ms(80));
        let stale = carousel.animation_id().expect("commit animation");

        carousel.jump_to(4);
        assert_eq!(carousel.tick_animation(stale, t0 + ms(500)), TickOutcome::Stale);
        assert_eq!(carousel.current_index(), 4);
        assert_eq!(carousel.drag_offset(), 0.0);
    }

    #[test]
    fn test_animation_follows_ease_out_curve() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        carousel.pointer_down(300.0, t0);
        carousel.pointer_up(240.0, t0 + ms(100));
        let id = carousel.animation_id().expect("commit animation");

        match carousel.tick_animation(id, t0 + ms(250)) {
            TickOutcome::Running(offset) => {
                let expected = -60.0 + (-WIDTH + 60.0) * 0.875;
                assert!((offset - expected).abs() < 0.01, "offset {offset}");
            }
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            carousel.tick_animation(id, t0 + ms(400)),
            TickOutcome::Completed(CarouselEvent::IndexChanged { from: 2, to: 3 })
        );
        assert_eq!(carousel.tick_animation(id, t0 + ms(450)), TickOutcome::Stale);
    }

    #[test]
    fn test_regrab_during_animation_continues_from_current_offset() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        carousel.pointer_down(300.0, t0);
        carousel.pointer_up(240.0, t0 + ms(100));
        let old = carousel.animation_id().expect("commit animation");

        let regrab_at = t0 + ms(250);
        let sampled = match carousel.clone().tick_animation(old, regrab_at) {
            TickOutcome::Running(offset) => offset,
            other => panic!("unexpected {other:?}"),
        };

        assert!(carousel.pointer_down(50.0, regrab_at));
        assert_eq!(carousel.phase(), Phase::Dragging);
        assert_eq!(carousel.pending_direction(), None);
        assert!((carousel.drag_offset() - sampled).abs() < 1e-3);

        // Frames from the cancelled animation no longer write state.
        assert_eq!(carousel.tick_animation(old, t0 + ms(600)), TickOutcome::Stale);
        assert_eq!(carousel.current_index(), 2);

        let moved = carousel.pointer_move(60.0).expect("dragging");
        assert!((moved - (sampled + 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_second_pointer_is_ignored_while_dragging() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        assert!(carousel.pointer_down(100.0, t0));
        carousel.pointer_move(80.0);
        assert!(!carousel.pointer_down(400.0, t0 + ms(10)));
        assert_eq!(carousel.pointer_move(70.0), Some(-30.0));
    }

    #[test]
    fn test_cancel_returns_to_idle_without_animation() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        carousel.pointer_down(100.0, t0);
        carousel.pointer_move(10.0);
        carousel.pointer_cancel();

        assert_eq!(carousel.phase(), Phase::Idle);
        assert_eq!(carousel.drag_offset(), 0.0);
        assert!(!carousel.is_animating());
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.pointer_up(10.0, t0 + ms(20)), None);
    }

    #[test]
    fn test_step_animates_to_neighbour() {
        let mut carousel = carousel(0);
        let t0 = Instant::now();
        assert_eq!(carousel.step(Direction::Backward, t0), None);
        assert_eq!(carousel.phase(), Phase::Idle);

        assert_eq!(carousel.step(Direction::Forward, t0), None);
        assert_eq!(carousel.phase(), Phase::AnimatingCommit(Direction::Forward));
        assert_eq!(
            settle(&mut carousel, t0),
            Some(CarouselEvent::IndexChanged { from: 0, to: 1 })
        );
    }

    #[test]
    fn test_repeated_steps_do_not_lose_moves() {
        let mut carousel = carousel(0);
        let t0 = Instant::now();
        carousel.step(Direction::Forward, t0);
        let event = carousel.step(Direction::Forward, t0 + ms(100));

        assert_eq!(event, Some(CarouselEvent::IndexChanged { from: 0, to: 1 }));
        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.phase(), Phase::AnimatingCommit(Direction::Forward));
        // The new current photo was mid-way in from the right.
        assert!(carousel.drag_offset() > 0.0 && carousel.drag_offset() < WIDTH);

        settle(&mut carousel, t0 + ms(100));
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn test_step_ignored_while_dragging() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        carousel.pointer_down(100.0, t0);
        assert_eq!(carousel.step(Direction::Forward, t0), None);
        assert_eq!(carousel.phase(), Phase::Dragging);
    }

    #[test]
    fn test_step_during_snap_back_commits_from_sampled_offset() {
        let mut carousel = carousel(5);
        let t0 = Instant::now();
        carousel.pointer_down(300.0, t0);
        carousel.pointer_move(240.0);
        carousel.pointer_up(240.0, t0 + ms(100));
        assert_eq!(carousel.phase(), Phase::AnimatingSnapBack);
        let snap_back = carousel.animation_id().expect("snap-back animation");

        let step_at = t0 + ms(250);
        let sampled = match carousel.clone().tick_animation(snap_back, step_at) {
            TickOutcome::Running(offset) => offset,
            other => panic!("unexpected {other:?}"),
        };
        assert!((sampled - -7.5).abs() < 0.01, "offset {sampled}");

        assert_eq!(carousel.step(Direction::Backward, step_at), None);
        assert_eq!(carousel.phase(), Phase::AnimatingCommit(Direction::Backward));
        assert_eq!(carousel.pending_direction(), Some(Direction::Backward));
        assert!((carousel.drag_offset() - sampled).abs() < 1e-3);
        assert_eq!(carousel.tick_animation(snap_back, step_at + ms(10)), TickOutcome::Stale);

        let commit = carousel.animation_id().expect("commit animation");
        match carousel.tick_animation(commit, step_at + ms(150)) {
            TickOutcome::Running(offset) => {
                let expected = sampled + (WIDTH - sampled) * 0.875;
                assert!((offset - expected).abs() < 0.01, "offset {offset}");
            }
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            settle(&mut carousel, step_at),
            Some(CarouselEvent::IndexChanged { from: 5, to: 4 })
        );
        assert_eq!(carousel.drag_offset(), 0.0);
    }

    #[test]
    fn test_step_onto_last_photo_then_snaps_back() {
        let mut carousel = carousel(4);
        let t0 = Instant::now();
        carousel.step(Direction::Forward, t0);

        let event = carousel.step(Direction::Forward, t0 + ms(100));
        assert_eq!(event, Some(CarouselEvent::IndexChanged { from: 4, to: 5 }));
        assert_eq!(carousel.current_index(), 5);
        assert_eq!(carousel.phase(), Phase::AnimatingSnapBack);
        assert_eq!(carousel.pending_direction(), None);

        // 1 - (2/3)^3 of the way to -WIDTH, seen from the new current photo
        let expected = -WIDTH * (1.0 - (2.0f32 / 3.0).powi(3)) + WIDTH;
        assert!(
            (carousel.drag_offset() - expected).abs() < 0.01,
            "offset {}",
            carousel.drag_offset()
        );

        assert_eq!(
            settle(&mut carousel, t0 + ms(100)),
            Some(CarouselEvent::Settled)
        );
        assert_eq!(carousel.current_index(), 5);
        assert_eq!(carousel.drag_offset(), 0.0);
        assert_eq!(carousel.phase(), Phase::Idle);
    }

    #[test]
    fn test_step_in_opposite_direction_during_commit() {
        let mut carousel = carousel(2);
        let t0 = Instant::now();
        carousel.step(Direction::Forward, t0);
        let forward = carousel.animation_id().expect("commit animation");

        let event = carousel.step(Direction::Backward, t0 + ms(100));
        assert_eq!(event, Some(CarouselEvent::IndexChanged { from: 2, to: 3 }));
        assert_eq!(carousel.current_index(), 3);
        assert_eq!(carousel.phase(), Phase::AnimatingCommit(Direction::Backward));
        assert_eq!(carousel.pending_direction(), Some(Direction::Backward));
        assert!(carousel.drag_offset() > 0.0 && carousel.drag_offset() < WIDTH);
        assert_eq!(carousel.tick_animation(forward, t0 + ms(500)), TickOutcome::Stale);

        assert_eq!(
            settle(&mut carousel, t0 + ms(100)),
            Some(CarouselEvent::IndexChanged { from: 3, to: 2 })
        );
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.phase(), Phase::Idle);
    }
}
