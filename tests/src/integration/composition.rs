//! # Composition Flow
//!
//! Boots the full container the way the host binary does and exercises the
//! cross-module contract: fallback mounting, shared state flowing between
//! independently mounted modules over the bus, and the wire shape of the
//! published payloads.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rand::Rng;
    use serde_json::json;

    use host_runtime::{HostConfig, HostContainer, RemoteRegistry};
    use mosaic_loader::StaticModule;
    use shared_bus::{EventFilter, EventTopic, HostEvent};

    fn offline_container() -> (HostContainer, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = HostConfig::default();
        config.storage.data_dir = dir.path().to_path_buf();
        // Keep the offline primary path fast: fail one short attempt and
        // fall back locally.
        for remote in config.remotes.values_mut() {
            remote.url = "http://127.0.0.1:9".to_string();
            remote.timeout_ms = Some(200);
            remote.max_retries = Some(0);
        }
        config.validate().expect("valid config");

        let container = HostContainer::new(config);
        for name in ["dashboard", "shop", "blog"] {
            container
                .local_modules()
                .register(Arc::new(StaticModule::new(name, format!("local {name}"))));
        }
        (container, dir)
    }

    #[tokio::test]
    async fn offline_remotes_mount_via_local_fallback() {
        let (container, _dir) = offline_container();
        let registry = RemoteRegistry::new(&container);
        let ctx = container.module_context();

        for name in registry.names() {
            let boundary = registry.outlet(&name).expect("configured remote");
            let view = boundary.mount(&ctx).await;
            assert!(view.is_ready(), "{name} should mount via fallback");
            assert!(!boundary.is_faulted());
        }
    }

    #[tokio::test]
    async fn cart_state_flows_between_modules_over_the_bus() {
        let (container, _dir) = offline_container();
        let state = container.shared_state();
        let bus = container.bus();

        // A "shop" module writes the cart; a "dashboard" module mirrors the
        // item count from the broadcast alone.
        let mirrored_count = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&mirrored_count);
        let _guard = bus.subscribe(EventFilter::topic(EventTopic::StateChange), move |event| {
            if let HostEvent::StateChanged { key, value } = event {
                if key == "cart" {
                    *sink.lock() = value.as_array().map_or(0, Vec::len);
                }
            }
        });

        let quantity: u32 = rand::thread_rng().gen_range(1..5);
        state.set(
            "cart",
            json!([{ "sku": "headphones", "quantity": quantity }]),
        );
        state.set(
            "cart",
            json!([
                { "sku": "headphones", "quantity": quantity },
                { "sku": "desk-lamp", "quantity": 1 },
            ]),
        );

        assert_eq!(*mirrored_count.lock(), 2);
        assert_eq!(
            state.get("cart").and_then(|v| v.as_array().map(|a| a.len())),
            Some(2)
        );
    }

    #[tokio::test]
    async fn navigation_reaches_modules_after_the_transition() {
        let (container, _dir) = offline_container();
        let router = container.router();
        let bus = container.bus();

        let paths = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&paths);
        let _guard = bus.subscribe(EventFilter::topic(EventTopic::Navigation), move |event| {
            if let HostEvent::Navigated { path, .. } = event {
                sink.lock().push(path.clone());
            }
        });

        router.push("/shop");
        router.push("/shop/cart");
        router.back();
        router.replace("/dashboard");

        // back() publishes nothing.
        assert_eq!(*paths.lock(), vec!["/shop", "/shop/cart", "/dashboard"]);
        assert_eq!(router.current_path(), "/dashboard");
    }

    #[tokio::test]
    async fn published_payloads_match_the_wire_contract() {
        let (container, _dir) = offline_container();
        let bus = container.bus();

        let payloads = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&payloads);
        let _guard = bus.subscribe(EventFilter::all(), move |event| {
            sink.lock()
                .push((event.topic().as_str(), event.payload()));
        });

        container.session().restore().await;
        container
            .session()
            .sign_in("a@example.com", "pw")
            .await
            .expect("sign in");
        container.shared_state().set("cart", json!([]));
        container.router().push("/shop");

        let captured = payloads.lock();
        let by_topic = |topic: &str| {
            captured
                .iter()
                .find(|(t, _)| *t == topic)
                .map(|(_, p)| p.clone())
                .unwrap_or_else(|| panic!("missing {topic} payload"))
        };

        let auth = by_topic("auth-change");
        assert_eq!(auth["type"], "login");
        assert_eq!(auth["user"]["displayName"], "a");
        assert_eq!(auth["user"]["email"], "a@example.com");

        let state = by_topic("state-change");
        assert_eq!(state["key"], "cart");
        assert!(state["value"].is_array());

        let nav = by_topic("navigation");
        assert_eq!(nav["path"], "/shop");
        assert_eq!(nav["type"], "push");
    }

    #[tokio::test]
    async fn modules_see_the_session_snapshot_they_mounted_with() {
        let (container, _dir) = offline_container();
        container.session().restore().await;
        container
            .session()
            .sign_in("buyer@example.com", "pw")
            .await
            .expect("sign in");

        let ctx = container.module_context();
        assert!(ctx.session.is_authenticated);
        assert_eq!(
            ctx.session.user.as_ref().map(|u| u.display_name.as_str()),
            Some("buyer")
        );
    }
}
