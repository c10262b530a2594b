// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic test-pattern camera source
//!
//! Produces a slowly drifting color gradient so the booth can run without
//! camera hardware (`--pattern`) and so capture logic is testable with
//! deterministic frames.

use crate::backends::camera::types::{CameraFrame, FramePoll, PixelFormat};
use futures::channel::mpsc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Pattern frame size; small keeps the channel cheap
const PATTERN_WIDTH: u32 = 640;
const PATTERN_HEIGHT: u32 = 480;

/// Pattern frame rate
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Build one pattern frame for a tick counter
///
/// Pure function so tests get identical frames for identical ticks.
pub fn synthetic_frame(width: u32, height: u32, tick: u32) -> CameraFrame {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    let shift = (tick % 256) as u32;
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255 / width.max(1)) + shift) % 256;
            let g = (y * 255 / height.max(1)) % 256;
            let b = (255 - shift) % 256;
            data.push(r as u8);
            data.push(g as u8);
            data.push(b as u8);
        }
    }

    CameraFrame {
        width,
        height,
        data: Arc::from(data.into_boxed_slice()),
        format: PixelFormat::RGB24,
        stride: width * 3,
        captured_at: Instant::now(),
    }
}

/// A running test-pattern stream with the same polling interface as the
/// V4L2 stream
pub struct PatternStream {
    receiver: mpsc::Receiver<CameraFrame>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PatternStream {
    /// Start generating pattern frames
    pub fn open() -> PatternStream {
        let (mut sender, receiver) = mpsc::channel(4);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = std::thread::spawn(move || {
            let mut tick: u32 = 0;
            while !stop_flag.load(Ordering::SeqCst) {
                let frame = synthetic_frame(PATTERN_WIDTH, PATTERN_HEIGHT, tick);
                tick = tick.wrapping_add(2);
                match sender.try_send(frame) {
                    Ok(()) => {}
                    Err(e) if e.is_full() => {}
                    Err(_) => break,
                }
                std::thread::sleep(FRAME_INTERVAL);
            }
        });

        PatternStream {
            receiver,
            stop,
            handle: Some(handle),
        }
    }

    /// Poll for the next frame without blocking
    pub fn poll(&mut self) -> FramePoll {
        match self.receiver.try_next() {
            Ok(Some(frame)) => FramePoll::Frame(frame),
            Ok(None) => FramePoll::Ended,
            Err(_) => FramePoll::Empty,
        }
    }
}

impl Drop for PatternStream {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
