//! # Health Cycle
//!
//! Liveness loop over a mixed target set, with the real HTTP probe against
//! unreachable local ports and a scripted probe for the healthy paths.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use mosaic_monitor::{
        HealthMonitor, HealthTarget, HttpProbe, LivenessProbe, ProbeError,
    };
    use shared_bus::{EventBus, EventFilter, EventTopic, HostEvent};
    use shared_types::HealthStatus;

    struct ScriptedProbe;

    #[async_trait]
    impl LivenessProbe for ScriptedProbe {
        async fn check(&self, target_url: &str) -> Result<(), ProbeError> {
            if target_url.contains("dead") {
                Err(ProbeError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn mixed_targets() -> Vec<HealthTarget> {
        vec![
            HealthTarget {
                name: "dashboard".to_string(),
                url: "http://localhost:3001".to_string(),
            },
            HealthTarget {
                name: "shop".to_string(),
                url: "http://dead.localhost:3002".to_string(),
            },
            HealthTarget {
                name: "blog".to_string(),
                url: "http://localhost:3003".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn one_cycle_yields_one_record_per_target() {
        let bus = Arc::new(EventBus::new());
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&published);
        let _guard = bus.subscribe(EventFilter::topic(EventTopic::Health), move |event| {
            if let HostEvent::HealthChanged(record) = event {
                sink.lock().push(record.clone());
            }
        });

        let monitor = HealthMonitor::new(mixed_targets(), Arc::new(ScriptedProbe), bus);
        monitor.run_cycle().await;

        let records = published.lock();
        assert_eq!(records.len(), 3);

        let down: Vec<_> = records
            .iter()
            .filter(|r| r.status == HealthStatus::Down)
            .collect();
        assert_eq!(down.len(), 1);
        assert_eq!(down[0].target, "shop");
        assert!(down[0].error_detail.as_deref().is_some_and(|d| !d.is_empty()));

        for record in records.iter().filter(|r| r.status == HealthStatus::Healthy) {
            assert!(record.error_detail.is_none());
        }
    }

    #[tokio::test]
    async fn http_probe_marks_unreachable_targets_down() {
        let bus = Arc::new(EventBus::new());
        let monitor = HealthMonitor::new(
            vec![HealthTarget {
                name: "ghost".to_string(),
                // Reserved discard port: refused immediately.
                url: "http://127.0.0.1:9".to_string(),
            }],
            Arc::new(HttpProbe::new()),
            bus,
        );

        let handle = monitor.start();
        // The first cycle runs immediately; give the task a tick to finish
        // the refused connection.
        tokio::time::sleep(Duration::from_millis(200)).await;

        let record = handle.record("ghost").expect("probed record");
        assert_eq!(record.status, HealthStatus::Down);
        assert!(record.error_detail.is_some());
        handle.stop();
    }

    #[tokio::test]
    async fn stopping_the_handle_tears_the_loop_down() {
        let bus = Arc::new(EventBus::new());
        let counted = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&counted);
        let _guard = bus.subscribe(EventFilter::topic(EventTopic::Health), move |_| {
            *sink.lock() += 1;
        });

        let monitor = HealthMonitor::new(
            vec![HealthTarget {
                name: "dashboard".to_string(),
                url: "http://localhost:3001".to_string(),
            }],
            Arc::new(ScriptedProbe),
            bus,
        )
        .with_interval(Duration::from_millis(20));

        let handle = monitor.start();
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.stop();

        let after_stop = *counted.lock();
        assert!(after_stop >= 1, "at least the immediate cycle ran");

        // No further cycles fire once the handle is gone.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*counted.lock(), after_stop);
    }
}
