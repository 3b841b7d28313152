//! # Session Flow
//!
//! Identity lifecycle end to end against the file-backed store: restore on
//! a cold start, sign-in persistence across "restarts", corrupt-state
//! recovery, and sign-out cleanup.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use mosaic_session::{JsonFileStore, SessionManager, USER_STORAGE_KEY};
    use shared_bus::{AuthTransition, EventBus, EventFilter, EventTopic, HostEvent};

    fn manager_at(dir: &std::path::Path, bus: Arc<EventBus>) -> SessionManager {
        SessionManager::new(bus, Box::new(JsonFileStore::new(dir)))
    }

    #[tokio::test]
    async fn cold_start_restores_as_unauthenticated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let manager = manager_at(dir.path(), Arc::new(EventBus::new()));

        let snapshot = manager.restore().await;
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn identity_survives_a_process_restart() {
        let dir = tempfile::tempdir().expect("tempdir");

        // First process: sign in and drop everything.
        {
            let manager = manager_at(dir.path(), Arc::new(EventBus::new()));
            manager.restore().await;
            manager
                .sign_up("owner@example.com", "pw", "Owner")
                .await
                .expect("sign up");
        }

        // Second process: the persisted identity comes back verbatim.
        let manager = manager_at(dir.path(), Arc::new(EventBus::new()));
        let snapshot = manager.restore().await;
        assert!(snapshot.is_authenticated);
        let user = snapshot.user.expect("restored identity");
        assert_eq!(user.email, "owner@example.com");
        assert_eq!(user.display_name, "Owner");
    }

    #[tokio::test]
    async fn corrupt_persisted_state_is_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::new(dir.path());
        use mosaic_session::SessionStore;
        store
            .save(USER_STORAGE_KEY, "{definitely not json")
            .await
            .expect("seed corrupt state");

        let manager = manager_at(dir.path(), Arc::new(EventBus::new()));
        let snapshot = manager.restore().await;
        assert!(!snapshot.is_authenticated);
    }

    #[tokio::test]
    async fn sign_out_clears_memory_and_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bus = Arc::new(EventBus::new());

        let transitions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&transitions);
        let _guard = bus.subscribe(EventFilter::topic(EventTopic::AuthChange), move |event| {
            if let HostEvent::AuthChanged { user, kind } = event {
                sink.lock().push((user.is_some(), *kind));
            }
        });

        let manager = manager_at(dir.path(), Arc::clone(&bus));
        manager.restore().await;
        manager
            .sign_in("owner@example.com", "pw")
            .await
            .expect("sign in");
        manager.sign_out().await;

        assert_eq!(
            *transitions.lock(),
            vec![(true, AuthTransition::Login), (false, AuthTransition::Logout)]
        );

        // A fresh process sees nothing persisted.
        let rebooted = manager_at(dir.path(), Arc::new(EventBus::new()));
        assert!(!rebooted.restore().await.is_authenticated);
    }
}
