//! Pipeline wiring and failure surfacing
//!
//! The controller owns everything the per-frame path touches: the
//! decimator, the rate gate, the single packed output buffer, and the
//! stream sink. It is consumed into the delivery callback handed to the
//! capture device, so steady-state frame work happens entirely in the
//! capture subsystem's delivery context with no shared ambient state.

use crate::{FrameDecimator, RateGate};
use framecast_capture::FrameCallback;
use framecast_core::{
    DownscaleConfig, Error, FrameSink, PackedFrame, PixelFormat, RawFrame, Result,
};
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tracing::{error, trace};

/// Handle through which the control context observes pipeline failure
///
/// The delivery callback records the first fatal error and wakes any
/// waiter; the control context then drives teardown.
#[derive(Clone, Debug)]
pub struct PipelineMonitor {
    inner: Arc<MonitorInner>,
}

#[derive(Debug)]
struct MonitorInner {
    notify: Notify,
    failure: Mutex<Option<Error>>,
}

impl PipelineMonitor {
    fn new() -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                notify: Notify::new(),
                failure: Mutex::new(None),
            }),
        }
    }

    /// Record a fatal pipeline error; only the first is kept
    pub fn fail(&self, err: Error) {
        let mut slot = self.inner.failure.lock().unwrap();
        if slot.is_none() {
            *slot = Some(err);
        }
        drop(slot);
        self.inner.notify.notify_one();
    }

    /// Wait until the pipeline has failed
    ///
    /// Resolves immediately if the failure already happened.
    pub async fn failed(&self) {
        self.inner.notify.notified().await;
    }

    /// Take the recorded failure, if any
    pub fn take_failure(&self) -> Option<Error> {
        self.inner.failure.lock().unwrap().take()
    }
}

/// Wires gate, decimator, and sink to the capture delivery callback
#[derive(Debug)]
pub struct PipelineController<S> {
    decimator: FrameDecimator,
    gate: RateGate,
    packed: PackedFrame,
    sink: S,
    monitor: PipelineMonitor,
}

impl<S> PipelineController<S>
where
    S: FrameSink + Send + 'static,
{
    /// Build the pipeline around a pre-allocated output buffer
    pub fn new(
        config: DownscaleConfig,
        packed: PackedFrame,
        sink: S,
        gate: RateGate,
    ) -> Result<Self> {
        if packed.len() != config.packed_len() {
            return Err(Error::Config(format!(
                "Output buffer holds {} bytes, configuration needs {}",
                packed.len(),
                config.packed_len()
            )));
        }
        Ok(Self {
            decimator: FrameDecimator::new(config),
            gate,
            packed,
            sink,
            monitor: PipelineMonitor::new(),
        })
    }

    /// Failure handle for the control context
    pub fn monitor(&self) -> PipelineMonitor {
        self.monitor.clone()
    }

    /// Consume the controller into the per-frame delivery callback
    ///
    /// Per frame: a non-BGRX encoding is skipped silently; an unadmitted
    /// frame is dropped; otherwise the frame is decimated into the shared
    /// buffer and sent. A transform or send failure terminates delivery
    /// and is surfaced through the monitor.
    pub fn into_callback(mut self) -> FrameCallback {
        Box::new(move |raw: RawFrame<'_>| {
            if raw.format() != PixelFormat::Bgrx8888 {
                return ControlFlow::Continue(());
            }
            if !self.gate.admit() {
                return ControlFlow::Continue(());
            }

            let result = self
                .decimator
                .transform(&raw, &mut self.packed)
                .and_then(|_| self.sink.send(&self.packed));

            match result {
                Ok(()) => {
                    trace!(
                        "Forwarded frame {} ({} bytes)",
                        self.gate.frames_seen(),
                        self.packed.len()
                    );
                    ControlFlow::Continue(())
                }
                Err(e) => {
                    error!("Pipeline terminated: {}", e);
                    self.monitor.fail(e);
                    ControlFlow::Break(())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl FrameSink for RecordingSink {
        fn send(&mut self, frame: &PackedFrame) -> Result<()> {
            self.sent.lock().unwrap().push(frame.as_bytes().to_vec());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingSink;

    impl FrameSink for FailingSink {
        fn send(&mut self, _frame: &PackedFrame) -> Result<()> {
            Err(Error::ConnectionLost("broken pipe".to_string()))
        }
    }

    fn test_source(width: usize, height: usize) -> Vec<u8> {
        let mut src = vec![0u8; width * height * 4];
        for sy in 0..height {
            for sx in 0..width {
                let idx = (sy * width + sx) * 4;
                src[idx] = (sx * 10) as u8;
                src[idx + 1] = (sy * 10) as u8;
                src[idx + 2] = 255;
            }
        }
        src
    }

    fn controller_with_sink<S: FrameSink + Send + 'static>(
        sink: S,
    ) -> PipelineController<S> {
        let config = DownscaleConfig::new(4, 3, 2).unwrap();
        let packed = PackedFrame::new(&config).unwrap();
        PipelineController::new(config, packed, sink, RateGate::every_second()).unwrap()
    }

    #[test]
    fn admitted_frames_reach_the_sink_decimated() {
        let sink = RecordingSink::default();
        let sent = Arc::clone(&sink.sent);
        let mut callback = controller_with_sink(sink).into_callback();

        let src = test_source(8, 6);
        for _ in 0..4 {
            let raw = RawFrame::new(&src, 8, 6, PixelFormat::Bgrx8888).unwrap();
            assert!(callback(raw).is_continue());
        }

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 2, "every second frame is forwarded");
        for frame in sent.iter() {
            assert_eq!(frame.len(), 4 * 3 * 3);
            // Output pixel (3, 2) samples source (6, 4)
            let idx = (2 * 4 + 3) * 3;
            assert_eq!(&frame[idx..idx + 3], &[60, 40, 255]);
        }
    }

    #[test]
    fn foreign_encodings_are_skipped_silently() {
        let sink = RecordingSink::default();
        let sent = Arc::clone(&sink.sent);
        let mut callback = controller_with_sink(sink).into_callback();

        let bgr = vec![0u8; 8 * 6 * 3];
        for _ in 0..5 {
            let raw = RawFrame::new(&bgr, 8, 6, PixelFormat::Bgr888).unwrap();
            assert!(callback(raw).is_continue());
        }
        assert!(sent.lock().unwrap().is_empty());

        // Skipped frames do not advance the admission counter
        let src = test_source(8, 6);
        let raw = RawFrame::new(&src, 8, 6, PixelFormat::Bgrx8888).unwrap();
        assert!(callback(raw).is_continue());
        assert!(sent.lock().unwrap().is_empty(), "first BGRX frame is gated");
        let raw = RawFrame::new(&src, 8, 6, PixelFormat::Bgrx8888).unwrap();
        assert!(callback(raw).is_continue());
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn send_failure_terminates_delivery_and_surfaces() {
        let controller = controller_with_sink(FailingSink);
        let monitor = controller.monitor();
        let mut callback = controller.into_callback();

        let src = test_source(8, 6);
        let raw = RawFrame::new(&src, 8, 6, PixelFormat::Bgrx8888).unwrap();
        assert!(callback(raw).is_continue(), "first frame is gated, no send");
        let raw = RawFrame::new(&src, 8, 6, PixelFormat::Bgrx8888).unwrap();
        assert!(callback(raw).is_break());

        let failure = monitor.take_failure().expect("failure recorded");
        assert!(matches!(failure, Error::ConnectionLost(_)));
    }

    #[test]
    fn undersized_source_is_a_typed_failure() {
        let controller = controller_with_sink(RecordingSink::default());
        let monitor = controller.monitor();
        let mut callback = controller.into_callback();

        let src = test_source(6, 4);
        // Admission interval 2: second delivery reaches the transform
        let raw = RawFrame::new(&src, 6, 4, PixelFormat::Bgrx8888).unwrap();
        assert!(callback(raw).is_continue());
        let raw = RawFrame::new(&src, 6, 4, PixelFormat::Bgrx8888).unwrap();
        assert!(callback(raw).is_break());

        assert!(matches!(
            monitor.take_failure(),
            Some(Error::SourceTooSmall { .. })
        ));
    }

    #[tokio::test]
    async fn monitor_wakes_a_waiter_after_failure() {
        let monitor = PipelineMonitor::new();
        monitor.fail(Error::ConnectionLost("gone".to_string()));
        monitor.failed().await;
        assert!(monitor.take_failure().is_some());
    }

    #[test]
    fn mismatched_buffer_is_rejected_at_construction() {
        let config = DownscaleConfig::new(4, 3, 2).unwrap();
        let other = DownscaleConfig::new(8, 6, 2).unwrap();
        let packed = PackedFrame::new(&other).unwrap();
        let err = PipelineController::new(config, packed, FailingSink, RateGate::every_second())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
