// Path: crates/telemetry/src/time.rs
use crate::sinks::AnchorMetricsSink;
use std::time::Instant;

/// Observes the elapsed time of an anchor fetch when dropped.
pub struct Timer<'a, S: AnchorMetricsSink + ?Sized> {
    sink: &'a S,
    start: Instant,
}

impl<'a, S: AnchorMetricsSink + ?Sized> Timer<'a, S> {
    pub fn new(sink: &'a S) -> Self {
        Self {
            sink,
            start: Instant::now(),
        }
    }
}

impl<S: AnchorMetricsSink + ?Sized> Drop for Timer<'_, S> {
    fn drop(&mut self) {
        self.sink
            .observe_anchor_fetch_duration(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder(Mutex<Vec<f64>>);

    impl AnchorMetricsSink for Recorder {
        fn inc_anchor_checks(&self, _outcome: &'static str) {}
        fn observe_anchor_fetch_duration(&self, duration_secs: f64) {
            self.0.lock().unwrap().push(duration_secs);
        }
    }

    #[test]
    fn test_timer_observes_on_drop() {
        let recorder = Recorder::default();
        {
            let _timer = Timer::new(&recorder);
        }
        let observed = recorder.0.lock().unwrap();
        assert_eq!(observed.len(), 1);
        assert!(observed[0] >= 0.0);
    }
}
