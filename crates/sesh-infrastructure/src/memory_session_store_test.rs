use super::*;
use std::collections::HashSet;

fn point(lon: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lon, lat).unwrap()
}

fn session_at(id: &str, location: GeoPoint, ends_in: Duration) -> Session {
    let now = Utc::now();
    Session {
        id: SessionId::from(id),
        name: format!("session {id}"),
        description: None,
        host_id: "host".into(),
        location,
        starts_at: now + ends_in - Duration::hours(2),
        ends_at: now + ends_in,
        is_public: true,
        subject: "Math".to_string(),
        faculty: "Engineering".to_string(),
        year: 2,
        invitee_ids: HashSet::new(),
        participant_ids: HashSet::new(),
        created_at: now,
    }
}

fn store() -> MemorySessionStore {
    MemorySessionStore::new(&StoreSettings {
        sweep_interval_secs: 60,
        expiry_grace_secs: 300,
    })
}

#[tokio::test]
async fn save_and_find_roundtrip() {
    let store = store();
    let session = session_at("s1", point(11.5820, 48.1351), Duration::hours(2));
    store.save(&session).await.unwrap();

    let found = store.find_by_id(&SessionId::from("s1")).await.unwrap();
    assert_eq!(found, Some(session));
}

#[tokio::test]
async fn save_is_an_upsert() {
    let store = store();
    let mut session = session_at("s1", point(0.0, 0.0), Duration::hours(2));
    store.save(&session).await.unwrap();
    session.name = "renamed".to_string();
    store.save(&session).await.unwrap();

    let all = store.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "renamed");
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let store = store();
    let err = store.delete(&SessionId::from("nope")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_removes_from_radius_queries() {
    let store = store();
    let session = session_at("s1", point(11.5820, 48.1351), Duration::hours(2));
    store.save(&session).await.unwrap();
    store.delete(&session.id).await.unwrap();

    let hits = store
        .find_within_radius(&point(11.5820, 48.1351), 1_000.0)
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn radius_query_returns_nearest_first() {
    let store = store();
    let center = point(11.5820, 48.1351);
    store
        .save(&session_at("far", point(11.6200, 48.1500), Duration::hours(2)))
        .await
        .unwrap();
    store
        .save(&session_at("near", point(11.5830, 48.1352), Duration::hours(2)))
        .await
        .unwrap();

    let hits = store.find_within_radius(&center, 10_000.0).await.unwrap();
    let ids: Vec<&str> = hits.iter().map(|(s, _)| s.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "far"]);
    assert!(hits[0].1 <= hits[1].1);
}

#[tokio::test]
async fn expired_sessions_are_invisible_before_the_sweep() {
    // Ended a minute ago: still physically present (grace is 5 minutes)
    // but no query may return it.
    let store = store();
    let expired = session_at("old", point(0.0, 0.0), Duration::minutes(-1));
    store.save(&expired).await.unwrap();

    assert_eq!(store.find_by_id(&expired.id).await.unwrap(), None);
    assert!(store.find_all().await.unwrap().is_empty());
    assert!(
        store
            .find_within_radius(&point(0.0, 0.0), 1_000.0)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn purge_respects_the_grace_period() {
    let store = store();
    let now = Utc::now();
    // Ended 10 minutes ago: past grace, purged.
    store
        .save(&session_at("long-gone", point(0.0, 0.0), Duration::minutes(-10)))
        .await
        .unwrap();
    // Ended 1 minute ago: inside grace, kept (but invisible).
    store
        .save(&session_at("just-ended", point(0.0, 0.0), Duration::minutes(-1)))
        .await
        .unwrap();

    let removed = store.purge_expired(now).await;
    assert_eq!(removed, 1);

    // The survivor is still physically there, so a second purge after the
    // grace elapses removes it too.
    let later = now + Duration::minutes(10);
    assert_eq!(store.purge_expired(later).await, 1);
}

#[tokio::test(start_paused = true)]
async fn sweep_task_purges_periodically() {
    let store = store();
    store
        .save(&session_at("old", point(0.0, 0.0), Duration::minutes(-10)))
        .await
        .unwrap();

    let _guard = store.spawn_ttl_sweep(std::time::Duration::from_secs(60));
    // Give the first tick a chance to run under the paused clock.
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;

    let inner = store.inner.read().await;
    assert!(inner.sessions.is_empty());
    assert!(inner.index.is_empty());
}

#[tokio::test]
async fn sweep_guard_aborts_task_on_drop() {
    let store = store();
    let guard = store.spawn_ttl_sweep(std::time::Duration::from_secs(3600));
    drop(guard);
    // Nothing to assert beyond "dropping does not hang or panic".
}
