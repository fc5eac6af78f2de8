//! Session lifecycle: discover, flush to disk, restart, reload.

use setu_nav::{FlushConfig, FlushScheduler, Navigator, Position};
use std::time::Duration;

const WORLD: &str = "persist-world";

#[test]
fn discoveries_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ModData").join("found_links.json");

    // Session one: discover a link, then tear down
    {
        let mut nav = Navigator::new();
        let mut scheduler = FlushScheduler::new(&path, FlushConfig::default());
        scheduler.load_into(nav.store_mut());

        nav.set_origin_if_absent(WORLD, Position::new(0, 110, 0));
        nav.record_observation(
            WORLD,
            Position::new(10, 0, 0),
            Some(Position::new(90, 0, 0)),
        );
        nav.query(WORLD, Position::new(0, 0, 0), Position::new(100, 0, 0));

        assert!(scheduler.flush_now(nav.store_mut()));
    }

    // Session two: everything is back
    {
        let mut nav = Navigator::new();
        let mut scheduler = FlushScheduler::new(&path, FlushConfig::default());
        scheduler.load_into(nav.store_mut());

        assert_eq!(nav.known_links(WORLD), 1);
        assert_eq!(nav.origin(WORLD), Some(Position::new(0, 110, 0)));

        let pair = nav.last_query(WORLD).unwrap();
        assert_eq!(pair.start, Position::new(0, 0, 0));
        assert_eq!(pair.goal, Position::new(100, 0, 0));

        // Loaded state is in sync with disk
        assert!(!nav.store().is_dirty());
        assert!(!scheduler.flush_now(nav.store_mut()));

        let route = nav.query(WORLD, pair.start, pair.goal);
        assert_eq!(route.total_distance(), 20);
    }
}

#[test]
fn corrupt_snapshot_starts_a_fresh_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("found_links.json");
    std::fs::write(&path, b"<<< corrupted >>>").unwrap();

    let mut nav = Navigator::new();
    let mut scheduler = FlushScheduler::new(&path, FlushConfig::default());
    scheduler.load_into(nav.store_mut());

    // Empty store, fully functional session
    assert_eq!(nav.known_links(WORLD), 0);
    let route = nav.query(WORLD, Position::new(0, 0, 0), Position::new(100, 0, 0));
    assert!(route.is_found());
    assert_eq!(route.total_distance(), 100);

    // The next flush replaces the corrupt document
    nav.record_observation(WORLD, Position::new(1, 2, 3), None);
    assert!(scheduler.flush_now(nav.store_mut()));

    let mut reloaded = Navigator::new();
    scheduler.load_into(reloaded.store_mut());
    assert_eq!(reloaded.known_links(WORLD), 1);
}

#[test]
fn identical_reobservation_causes_no_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("found_links.json");

    let mut nav = Navigator::new();
    let config = FlushConfig::new().with_min_interval(Duration::ZERO);
    let mut scheduler = FlushScheduler::new(&path, config);

    let source = Position::new(10, 0, 0);
    let target = Some(Position::new(90, 0, 0));
    nav.record_observation(WORLD, source, target);
    assert!(scheduler.tick(nav.store_mut()));

    // The player keeps looking at the same block every tick
    for _ in 0..10 {
        nav.record_observation(WORLD, source, target);
        assert!(!scheduler.tick(nav.store_mut()));
    }
}

#[test]
fn flush_failure_keeps_state_pending() {
    let dir = tempfile::tempdir().unwrap();
    // A path whose parent is a regular file cannot be created
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let path = blocker.join("found_links.json");

    let mut nav = Navigator::new();
    let mut scheduler = FlushScheduler::new(&path, FlushConfig::default());
    nav.record_observation(WORLD, Position::new(1, 2, 3), None);

    // Write fails, dirty flag stays set, session keeps working
    assert!(!scheduler.flush_now(nav.store_mut()));
    assert!(nav.store().is_dirty());
    assert_eq!(nav.known_links(WORLD), 1);
}
