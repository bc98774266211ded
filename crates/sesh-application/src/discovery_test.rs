use super::*;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sesh_core::geo::haversine_distance_m;
use std::collections::HashSet;
use std::sync::Mutex;

struct MockStore {
    sessions: Mutex<Vec<Session>>,
}

impl MockStore {
    fn with(sessions: Vec<Session>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
        }
    }
}

#[async_trait]
impl SessionStore for MockStore {
    async fn find_by_id(&self, session_id: &SessionId) -> Result<Option<Session>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *session_id)
            .cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|s| s.id != session.id);
        sessions.push(session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != *session_id);
        if sessions.len() == before {
            return Err(SeshError::not_found("session", session_id.as_str()));
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Session>> {
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn find_within_radius(
        &self,
        center: &GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<(Session, f64)>> {
        let mut hits: Vec<(Session, f64)> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .map(|s| (s.clone(), haversine_distance_m(center, &s.location)))
            .filter(|(_, d)| *d <= radius_m)
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(hits)
    }
}

struct MockDirectory {
    users: Vec<User>,
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn resolve(&self, user_id: &UserId) -> Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == *user_id).cloned())
    }
}

fn plain_user(id: &str) -> User {
    User {
        id: UserId::from(id),
        display_name: id.to_string(),
        faculty: "Engineering".to_string(),
        year: 2,
        interests: String::new(),
        friend_ids: HashSet::new(),
    }
}

fn campus_point() -> GeoPoint {
    GeoPoint::new(11.5820, 48.1351).unwrap()
}

fn session_at(id: &str, host: &str, is_public: bool, location: GeoPoint) -> Session {
    let now = Utc::now();
    Session {
        id: SessionId::from(id),
        name: format!("session {id}"),
        description: None,
        host_id: UserId::from(host),
        location,
        starts_at: now + Duration::hours(1),
        ends_at: now + Duration::hours(3),
        is_public,
        subject: "Math".to_string(),
        faculty: "Engineering".to_string(),
        year: 2,
        invitee_ids: HashSet::new(),
        participant_ids: HashSet::new(),
        created_at: now,
    }
}

fn service(sessions: Vec<Session>, users: Vec<User>) -> SessionDiscoveryService {
    SessionDiscoveryService::new(
        Arc::new(MockStore::with(sessions)),
        Arc::new(MockDirectory { users }),
        DiscoverySettings::default(),
    )
}

fn nearby_query() -> NearbyQuery {
    NearbyQuery {
        center: campus_point(),
        radius_meters: 2_000.0,
    }
}

#[tokio::test]
async fn available_includes_hosted_unconditionally() {
    // Private, no invitees, not near anything: still the host's.
    let mine = session_at("mine", "me", false, campus_point());
    let svc = service(vec![mine], vec![plain_user("me")]);

    let sessions = svc.available_sessions(&UserId::from("me")).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, SessionId::from("mine"));
}

#[tokio::test]
async fn available_unions_the_four_sources() {
    let me = UserId::from("me");
    let hosted = session_at("hosted", "me", false, campus_point());
    let mut joined = session_at("joined", "h1", false, campus_point());
    joined.participant_ids.insert(me.clone());
    let public = session_at("public", "h2", true, campus_point());
    let mut invited = session_at("invited", "h3", false, campus_point());
    invited.invitee_ids.insert(me.clone());
    let hidden = session_at("hidden", "h4", false, campus_point());

    let svc = service(
        vec![hosted, joined, public, invited, hidden],
        vec![plain_user("me")],
    );
    let ids: Vec<SessionId> = svc
        .available_sessions(&me)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();

    assert!(ids.contains(&SessionId::from("hosted")));
    assert!(ids.contains(&SessionId::from("joined")));
    assert!(ids.contains(&SessionId::from("public")));
    assert!(ids.contains(&SessionId::from("invited")));
    assert!(!ids.contains(&SessionId::from("hidden")));
}

#[tokio::test]
async fn available_for_unknown_user_is_invalid_argument() {
    let svc = service(vec![], vec![]);
    let err = svc
        .available_sessions(&UserId::from("ghost"))
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn empty_universe_yields_empty_lists() {
    let svc = service(vec![], vec![plain_user("me")]);
    let me = UserId::from("me");
    assert!(svc.available_sessions(&me).await.unwrap().is_empty());
    assert!(
        svc.nearby_sessions(&me, &nearby_query())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn nearby_includes_public_regardless_of_relationship() {
    let public = session_at("pub", "host", true, campus_point());
    let svc = service(vec![public], vec![plain_user("stranger")]);

    let sessions = svc
        .nearby_sessions(&UserId::from("stranger"), &nearby_query())
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn nearby_hides_private_even_from_host_and_participants() {
    // Host/participant status does not bypass the invitee check on the
    // explore surface.
    let me = UserId::from("me");
    let hosted = session_at("hosted", "me", false, campus_point());
    let mut joined = session_at("joined", "other", false, campus_point());
    joined.participant_ids.insert(me.clone());

    let svc = service(vec![hosted, joined], vec![plain_user("me")]);
    let sessions = svc.nearby_sessions(&me, &nearby_query()).await.unwrap();
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn nearby_shows_private_to_invitees() {
    let me = UserId::from("me");
    let mut invited = session_at("invited", "host", false, campus_point());
    invited.invitee_ids.insert(me.clone());

    let svc = service(vec![invited], vec![plain_user("me")]);
    let sessions = svc.nearby_sessions(&me, &nearby_query()).await.unwrap();
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn nearby_respects_the_radius() {
    // ~28 km away from the campus center.
    let far_point = GeoPoint::new(11.7861, 48.3538).unwrap();
    let near = session_at("near", "host", true, campus_point());
    let far = session_at("far", "host", true, far_point);

    let svc = service(vec![near, far], vec![plain_user("me")]);
    let sessions = svc
        .nearby_sessions(&UserId::from("me"), &nearby_query())
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, SessionId::from("near"));
}

#[tokio::test]
async fn nearby_rejects_bad_radius() {
    let svc = service(vec![], vec![plain_user("me")]);
    let me = UserId::from("me");

    for radius in [0.0, -5.0, f64::NAN, 1_000_000.0] {
        let query = NearbyQuery {
            center: campus_point(),
            radius_meters: radius,
        };
        let err = svc.nearby_sessions(&me, &query).await.unwrap_err();
        assert!(err.is_invalid_argument(), "radius {radius} not rejected");
    }
}

#[tokio::test]
async fn nearby_rejects_malformed_center() {
    let svc = service(vec![], vec![plain_user("me")]);
    let query = NearbyQuery {
        center: GeoPoint {
            longitude: 500.0,
            latitude: 0.0,
        },
        radius_meters: 100.0,
    };
    let err = svc
        .nearby_sessions(&UserId::from("me"), &query)
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn rank_drops_sessions_with_unresolvable_hosts() {
    let kept = session_at("kept", "known-host", true, campus_point());
    let orphan = session_at("orphan", "ghost-host", true, campus_point());
    let svc = service(
        vec![],
        vec![plain_user("me"), plain_user("known-host")],
    );

    let ranked = svc
        .rank_sessions(&UserId::from("me"), vec![orphan, kept])
        .await
        .unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].session.id, SessionId::from("kept"));
}

#[tokio::test]
async fn rank_is_a_pure_reordering() {
    // rank_sessions must not filter by visibility: a private session the
    // viewer cannot see still comes back if the caller passed it in.
    let private = session_at("private", "host", false, campus_point());
    let svc = service(vec![], vec![plain_user("me"), plain_user("host")]);

    let ranked = svc
        .rank_sessions(&UserId::from("me"), vec![private])
        .await
        .unwrap();
    assert_eq!(ranked.len(), 1);
}

#[tokio::test]
async fn nearby_ranked_orders_by_score() {
    let me = plain_user("me"); // faculty Engineering, year 2
    let mut host_match = plain_user("h1");
    host_match.interests = "math, rust".to_string();

    let mut matching = session_at("matching", "h1", true, campus_point());
    matching.faculty = "Engineering".to_string();
    let mut other = session_at("other", "h2", true, campus_point());
    other.faculty = "Arts".to_string();
    other.year = 9;

    let svc = service(
        vec![matching, other],
        vec![me, host_match, plain_user("h2")],
    );
    let ranked = svc
        .nearby_ranked(&UserId::from("me"), &nearby_query())
        .await
        .unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].session.id, SessionId::from("matching"));
    assert!(ranked[0].score > ranked[1].score);
}
