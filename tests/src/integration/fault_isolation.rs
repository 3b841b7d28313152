//! # Fault Isolation
//!
//! One remote's defect must never take down the host shell or its sibling
//! modules. These flows drive real boundaries over the real loader with an
//! unreachable primary.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use parking_lot::Mutex;

    use host_runtime::{HostConfig, HostContainer, RemoteRegistry};
    use mosaic_boundary::BoundaryView;
    use mosaic_loader::{ModuleContext, ModuleError, ModuleView, RemoteModule, StaticModule};
    use shared_bus::{EventFilter, EventTopic, HostEvent};

    /// Module whose mount fails until `repaired` is set.
    struct Unstable {
        name: String,
        repaired: AtomicBool,
    }

    impl RemoteModule for Unstable {
        fn name(&self) -> &str {
            &self.name
        }
        fn mount(&self, _ctx: &ModuleContext) -> Result<ModuleView, ModuleError> {
            if self.repaired.load(Ordering::SeqCst) {
                Ok(ModuleView {
                    module: self.name.clone(),
                    body: "repaired".to_string(),
                })
            } else {
                Err(ModuleError::Mount {
                    name: self.name.clone(),
                    detail: "deployment is broken".to_string(),
                })
            }
        }
    }

    fn offline_container() -> (HostContainer, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = HostConfig::default();
        config.storage.data_dir = dir.path().to_path_buf();
        for remote in config.remotes.values_mut() {
            remote.url = "http://127.0.0.1:9".to_string();
            remote.timeout_ms = Some(200);
            remote.max_retries = Some(0);
        }
        (HostContainer::new(config), dir)
    }

    #[tokio::test]
    async fn a_faulted_remote_leaves_siblings_mountable() {
        let (container, _dir) = offline_container();

        // "shop" is broken; its siblings have healthy stand-ins.
        let shop = Arc::new(Unstable {
            name: "shop".to_string(),
            repaired: AtomicBool::new(false),
        });
        container.local_modules().register(Arc::clone(&shop) as Arc<dyn RemoteModule>);
        container
            .local_modules()
            .register(Arc::new(StaticModule::new("dashboard", "ok")));
        container
            .local_modules()
            .register(Arc::new(StaticModule::new("blog", "ok")));

        let faults = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&faults);
        let _guard = container.bus().subscribe(
            EventFilter::topic(EventTopic::RemoteError),
            move |event| {
                if let HostEvent::RemoteFaulted { name, .. } = event {
                    sink.lock().push(name.clone());
                }
            },
        );

        let registry = RemoteRegistry::new(&container);
        let ctx = container.module_context();

        let shop_view = registry.outlet("shop").unwrap().mount(&ctx).await;
        assert!(matches!(shop_view, BoundaryView::Recovery { .. }));

        // Siblings mount normally despite the shop fault.
        for name in ["dashboard", "blog"] {
            let view = registry.outlet(name).unwrap().mount(&ctx).await;
            assert!(view.is_ready(), "{name} must be unaffected");
        }

        assert_eq!(*faults.lock(), vec!["shop".to_string()]);
    }

    #[tokio::test]
    async fn recovery_is_explicit_and_remounts_once() {
        let (container, _dir) = offline_container();
        let shop = Arc::new(Unstable {
            name: "shop".to_string(),
            repaired: AtomicBool::new(false),
        });
        container.local_modules().register(Arc::clone(&shop) as Arc<dyn RemoteModule>);

        let registry = RemoteRegistry::new(&container);
        let ctx = container.module_context();
        let boundary = registry.outlet("shop").unwrap();

        assert!(!boundary.mount(&ctx).await.is_ready());
        assert!(boundary.is_faulted());

        // Without an explicit retry the boundary stays faulted even though
        // the module has been repaired.
        shop.repaired.store(true, Ordering::SeqCst);
        assert!(!boundary.mount(&ctx).await.is_ready());

        let view = boundary.retry(&ctx).await;
        assert!(view.is_ready());
        assert!(!boundary.is_faulted());
    }

    #[tokio::test]
    async fn unresolvable_remote_faults_the_boundary_not_the_process() {
        let (container, _dir) = offline_container();
        // No stand-in registered: both resolution paths fail.
        let registry = RemoteRegistry::new(&container);
        let ctx = container.module_context();
        let boundary = registry.outlet("blog").unwrap();

        let view = boundary.mount(&ctx).await;
        match view {
            BoundaryView::Recovery { module, detail } => {
                assert_eq!(module, "blog");
                assert!(!detail.is_empty());
            }
            BoundaryView::Ready(_) => panic!("mount must not succeed"),
        }
        assert!(boundary.is_faulted());
    }
}
