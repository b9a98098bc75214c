use prometheus::{IntCounterVec, Opts, Registry};

/// Prometheus counters for render requests, labeled by operation
/// (`game.gif` or `image.gif`).
pub struct GifMetrics {
    /// Requests the upstream accepted with a streamed body.
    pub rendered: IntCounterVec,
    /// Requests the upstream rejected, labeled by operation and status.
    pub failed: IntCounterVec,
}

impl GifMetrics {
    /// Create metrics and register them with the given prometheus registry.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let rendered = IntCounterVec::new(
            Opts::new("gif_rendered", "Accepted upstream render requests"),
            &["operation"],
        )?;
        let failed = IntCounterVec::new(
            Opts::new("gif_failed", "Rejected upstream render requests"),
            &["operation", "status"],
        )?;

        registry.register(Box::new(rendered.clone()))?;
        registry.register(Box::new(failed.clone()))?;

        Ok(Self { rendered, failed })
    }

    /// Create metrics without registering (for testing).
    pub fn unregistered() -> Self {
        Self {
            rendered: IntCounterVec::new(Opts::new("gif_rendered", "rendered"), &["operation"])
                .expect("valid metric name"),
            failed: IntCounterVec::new(Opts::new("gif_failed", "failed"), &["operation", "status"])
                .expect("valid metric name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_metrics_work() {
        let m = GifMetrics::unregistered();
        m.rendered.with_label_values(&["game.gif"]).inc();
        assert_eq!(m.rendered.with_label_values(&["game.gif"]).get(), 1);
    }

    #[test]
    fn registered_metrics_work() {
        let r = Registry::new();
        let m = GifMetrics::new(&r).unwrap();
        m.failed.with_label_values(&["image.gif", "503"]).inc();
        assert_eq!(m.failed.with_label_values(&["image.gif", "503"]).get(), 1);
    }
}
