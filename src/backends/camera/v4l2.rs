// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 camera source
//!
//! Opens a capture device, negotiates a format close to the preferred
//! 1280x720, and streams frames from a dedicated capture thread over a
//! bounded channel. The UI loop drains the channel without blocking; frames
//! are dropped when the consumer falls behind.
//!
//! The device is opened fresh for every booth session and released when the
//! stream is dropped (streaming stops and the device handle closes), so the
//! camera is never left locked after exit.

use crate::backends::camera::types::{
    BackendError, BackendResult, CameraDevice, CameraFrame, FramePoll, PixelFormat,
};
use crate::constants::{PREFERRED_HEIGHT, PREFERRED_WIDTH};
use futures::channel::mpsc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{error, info, warn};
use v4l::FourCC;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;

/// Bounded capacity of the frame channel between capture thread and UI
const FRAME_CHANNEL_CAPACITY: usize = 10;

/// Number of mmap buffers requested from the driver
const BUFFER_COUNT: u32 = 4;

/// Pixel format negotiated with the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireFormat {
    Yuyv,
    Mjpeg,
    Rgb24,
    Gray8,
}

/// Enumerate V4L2 capture devices
///
/// Nodes that cannot stream video (metadata or output nodes) are skipped.
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    let mut devices = Vec::new();

    for node in v4l::context::enum_devices() {
        let path = node.path().to_path_buf();
        let Ok(dev) = v4l::Device::with_path(&path) else {
            continue;
        };
        let Ok(caps) = dev.query_caps() else {
            continue;
        };
        if !caps
            .capabilities
            .contains(v4l::capability::Flags::VIDEO_CAPTURE)
        {
            continue;
        }
        // Metadata companion nodes advertise capture but expose no formats
        match dev.enum_formats() {
            Ok(formats) if !formats.is_empty() => {}
            _ => continue,
        }

        let name = if caps.card.is_empty() {
            node.name().unwrap_or_else(|| path.display().to_string())
        } else {
            caps.card.clone()
        };
        let lower = name.to_lowercase();
        let location = if lower.contains("front") || lower.contains("integrated") {
            Some("front".to_string())
        } else {
            None
        };

        devices.push(CameraDevice {
            name,
            path,
            driver: caps.driver.clone(),
            location,
        });
    }

    devices.sort_by(|a, b| a.path.cmp(&b.path));
    devices
}

/// Pick the capture device for a session
///
/// Preference order: the configured device path, then a user-facing camera,
/// then the first enumerated device.
pub fn select_device(preferred_path: Option<&str>) -> BackendResult<CameraDevice> {
    let devices = enumerate_cameras();
    if devices.is_empty() {
        return Err(BackendError::NoCameraFound);
    }

    if let Some(path) = preferred_path
        && let Some(dev) = devices.iter().find(|d| d.path.to_str() == Some(path))
    {
        return Ok(dev.clone());
    }

    Ok(devices
        .iter()
        .find(|d| d.is_user_facing())
        .unwrap_or(&devices[0])
        .clone())
}

/// A running camera stream
///
/// Owns the capture thread. Dropping the stream stops the thread, which
/// stops streaming and closes the device.
pub struct CameraStream {
    receiver: mpsc::Receiver<CameraFrame>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CameraStream {
    /// Open a device and start streaming
    ///
    /// Format negotiation happens synchronously so permission and device
    /// errors surface before the booth starts; only the streaming loop runs
    /// on the capture thread.
    pub fn open(device: &CameraDevice) -> BackendResult<CameraStream> {
        let dev = v4l::Device::with_path(&device.path)
            .map_err(|e| BackendError::Open(e.to_string()))?;

        let mut fmt = dev.format().map_err(|e| BackendError::Open(e.to_string()))?;
        fmt.width = PREFERRED_WIDTH;
        fmt.height = PREFERRED_HEIGHT;
        fmt.fourcc = FourCC::new(b"YUYV");
        let fmt = dev
            .set_format(&fmt)
            .map_err(|e| BackendError::Open(e.to_string()))?;

        let wire = match &fmt.fourcc.repr {
            b"YUYV" => WireFormat::Yuyv,
            b"MJPG" => WireFormat::Mjpeg,
            b"RGB3" => WireFormat::Rgb24,
            b"GREY" => WireFormat::Gray8,
            other => {
                return Err(BackendError::InvalidFormat(
                    String::from_utf8_lossy(other).into_owned(),
                ));
            }
        };

        info!(
            device = %device.path.display(),
            width = fmt.width,
            height = fmt.height,
            fourcc = %fmt.fourcc,
            "Camera format negotiated"
        );

        let (sender, receiver) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let width = fmt.width;
        let height = fmt.height;
        let stride = fmt.stride;

        let handle = std::thread::spawn(move || {
            if let Err(e) = stream_loop(&dev, width, height, stride, wire, sender, &stop_flag) {
                error!(error = %e, "Camera stream ended");
            }
            // Sender drops here; the UI loop observes the closed channel
        });

        Ok(CameraStream {
            receiver,
            stop,
            handle: Some(handle),
        })
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

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn stream_loop(
    dev: &v4l::Device,
    width: u32,
    height: u32,
    stride: u32,
    wire: WireFormat,
    mut sender: mpsc::Sender<CameraFrame>,
    stop: &AtomicBool,
) -> BackendResult<()> {
    let mut stream = Stream::with_buffers(dev, Type::VideoCapture, BUFFER_COUNT)
        .map_err(|e| BackendError::Stream(e.to_string()))?;

    while !stop.load(Ordering::SeqCst) {
        let (buf, _meta) = stream
            .next()
            .map_err(|e| BackendError::Stream(e.to_string()))?;

        let Some(frame) = convert_buffer(buf, width, height, stride, wire) else {
            // Corrupt compressed frames happen during warm-up; skip them
            continue;
        };

        match sender.try_send(frame) {
            Ok(()) => {}
            Err(e) if e.is_full() => {
                // UI is behind; drop the frame and keep the feed live
            }
            Err(_) => break, // Receiver gone, tear down
        }
    }

    Ok(())
}

/// Convert a driver buffer into a CameraFrame
fn convert_buffer(
    buf: &[u8],
    width: u32,
    height: u32,
    stride: u32,
    wire: WireFormat,
) -> Option<CameraFrame> {
    let now = Instant::now();
    match wire {
        WireFormat::Yuyv => Some(CameraFrame {
            width,
            height,
            data: Arc::from(buf.to_vec().into_boxed_slice()),
            format: PixelFormat::YUYV,
            stride: if stride > 0 { stride } else { width * 2 },
            captured_at: now,
        }),
        WireFormat::Rgb24 => Some(CameraFrame {
            width,
            height,
            data: Arc::from(buf.to_vec().into_boxed_slice()),
            format: PixelFormat::RGB24,
            stride: if stride > 0 { stride } else { width * 3 },
            captured_at: now,
        }),
        WireFormat::Gray8 => Some(CameraFrame {
            width,
            height,
            data: Arc::from(buf.to_vec().into_boxed_slice()),
            format: PixelFormat::Gray8,
            stride: if stride > 0 { stride } else { width },
            captured_at: now,
        }),
        WireFormat::Mjpeg => {
            let decoded =
                match image::load_from_memory_with_format(buf, image::ImageFormat::Jpeg) {
                    Ok(img) => img.to_rgb8(),
                    Err(e) => {
                        warn!(error = %e, "Dropping undecodable MJPEG frame");
                        return None;
                    }
                };
            let (w, h) = decoded.dimensions();
            Some(CameraFrame {
                width: w,
                height: h,
                data: Arc::from(decoded.into_raw().into_boxed_slice()),
                format: PixelFormat::RGB24,
                stride: w * 3,
                captured_at: now,
            })
        }
    }
}
