//! Full pipeline integration: synthetic capture through TCP delivery
//!
//! Wires the real components together the way the binary does and checks
//! the bytes that actually cross the wire.

use framecast_capture::{CaptureDevice, SyntheticCapture};
use framecast_core::{DownscaleConfig, PackedFrame, StreamConfig};
use framecast_pipeline::{PipelineController, RateGate};
use framecast_sink::TcpSink;
use std::io::Read;
use std::net::TcpListener;
use std::sync::mpsc;

#[test]
fn synthetic_frames_arrive_decimated_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    // 64x36 source at stride 4 -> 16x9 output
    let config = DownscaleConfig::from_source(64, 36, 4).unwrap();
    let frame_len = config.packed_len();
    assert_eq!(frame_len, 16 * 9 * 3);

    let (tx, rx) = mpsc::channel();
    let receiver = std::thread::spawn(move || {
        let (mut conn, _) = listener.accept().unwrap();
        let mut buf = vec![0u8; frame_len * 3];
        conn.read_exact(&mut buf).unwrap();
        tx.send(buf).unwrap();
        // Drain until the producer hangs up so late sends never fail
        let mut rest = Vec::new();
        let _ = conn.read_to_end(&mut rest);
    });

    let packed = PackedFrame::new(&config).unwrap();
    let sink = TcpSink::connect(&StreamConfig::new(addr.ip().to_string(), addr.port())).unwrap();
    let mut capture = SyntheticCapture::open(64, 36, 500).unwrap();

    let controller =
        PipelineController::new(config, packed, sink, RateGate::every_second()).unwrap();
    let monitor = controller.monitor();
    capture.start_delivery(controller.into_callback()).unwrap();

    let received = rx.recv().unwrap();
    capture.stop_delivery().unwrap();
    receiver.join().unwrap();

    assert!(monitor.take_failure().is_none());
    assert_eq!(received.len(), frame_len * 3);

    // Every second frame is admitted, so the first frame on the wire is
    // delivery tick 1 of the moving gradient: output pixel (x, y) samples
    // source (4x, 4y) with blue = sx + tick, green = sy + tick,
    // red = (sx + sy) / 2.
    let first = &received[..frame_len];
    for y in 0..9usize {
        for x in 0..16usize {
            let idx = (y * 16 + x) * 3;
            let (sx, sy) = (4 * x, 4 * y);
            assert_eq!(first[idx] as usize, (sx + 1) % 256, "blue at ({x},{y})");
            assert_eq!(first[idx + 1] as usize, (sy + 1) % 256, "green at ({x},{y})");
            assert_eq!(first[idx + 2] as usize, ((sx + sy) / 2) % 256, "red at ({x},{y})");
        }
    }
}
