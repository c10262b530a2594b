// SPDX-License-Identifier: GPL-3.0-only

//! Countdown and multi-shot sequencing
//!
//! A capture runs as an explicit state machine:
//!
//! ```text
//! CountingDown(remaining) --tick--> ... --zero--> AwaitingShot
//!        ^                                            |
//!        '----------- next shot (if more) ------------'
//! ```
//!
//! The machine is advanced with wall-clock instants supplied by the event
//! loop, so timing is deterministic under test. Shots are strictly
//! sequential: the countdown for shot N+1 only starts once shot N's still
//! has been handed back via [`CaptureSequence::complete_shot`].

use crate::catalog::Frame;
use crate::constants::{COUNTDOWN_SECONDS, COUNTDOWN_TICK};
use crate::session::CapturedPhoto;
use image::RgbaImage;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Ticking down before a shot
    CountingDown {
        shot_index: u32,
        remaining: u32,
        next_tick: Instant,
    },
    /// Countdown hit zero; the driver owes us a rasterized still
    AwaitingShot { shot_index: u32 },
}

/// What the sequence needs from the driver right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    /// Nothing due yet
    Waiting,
    /// Rasterize the current camera frame for this shot
    ShotDue { shot_index: u32 },
}

/// An in-progress capture for one frame selection
pub struct CaptureSequence {
    frame: &'static Frame,
    phase: Phase,
    stills: Vec<Arc<RgbaImage>>,
}

impl CaptureSequence {
    /// Start a capture sequence for the given frame
    pub fn start(frame: &'static Frame, now: Instant) -> Self {
        info!(
            frame = frame.id,
            shots = frame.shot_count,
            "Starting capture countdown"
        );
        Self {
            frame,
            phase: Phase::CountingDown {
                shot_index: 0,
                remaining: COUNTDOWN_SECONDS,
                next_tick: now + COUNTDOWN_TICK,
            },
            stills: Vec::with_capacity(frame.shot_count as usize),
        }
    }

    /// The frame this sequence was started with
    pub fn frame(&self) -> &'static Frame {
        self.frame
    }

    /// Remaining countdown value to render, if counting down
    pub fn countdown(&self) -> Option<u32> {
        match self.phase {
            Phase::CountingDown { remaining, .. } if remaining > 0 => Some(remaining),
            _ => None,
        }
    }

    /// Number of stills acquired so far
    pub fn shots_taken(&self) -> usize {
        self.stills.len()
    }

    /// Advance the machine to `now`
    ///
    /// Returns [`SequenceStep::ShotDue`] while a shot is owed; the request
    /// stays pending until the driver calls [`Self::complete_shot`], so a
    /// slow frame source delays the shot instead of dropping it.
    pub fn advance(&mut self, now: Instant) -> SequenceStep {
        if let Phase::CountingDown {
            shot_index,
            mut remaining,
            mut next_tick,
        } = self.phase
        {
            while remaining > 0 && now >= next_tick {
                remaining -= 1;
                next_tick += COUNTDOWN_TICK;
                debug!(remaining, shot = shot_index, "Countdown tick");
            }
            self.phase = if remaining == 0 {
                Phase::AwaitingShot { shot_index }
            } else {
                Phase::CountingDown {
                    shot_index,
                    remaining,
                    next_tick,
                }
            };
        }

        match self.phase {
            Phase::AwaitingShot { shot_index } => SequenceStep::ShotDue { shot_index },
            Phase::CountingDown { .. } => SequenceStep::Waiting,
        }
    }

    /// Hand a rasterized still back to the sequence
    ///
    /// Emits the completed photo once all required shots are in; otherwise
    /// the countdown for the next shot starts at `now`.
    pub fn complete_shot(&mut self, still: Arc<RgbaImage>, now: Instant) -> Option<CapturedPhoto> {
        self.stills.push(still);
        let taken = self.stills.len() as u32;

        if taken >= self.frame.shot_count {
            let photo = CapturedPhoto {
                id: format!("photo-{}", chrono::Utc::now().timestamp_millis()),
                stills: std::mem::take(&mut self.stills),
                frame_id: self.frame.id.to_string(),
            };
            info!(
                id = %photo.id,
                stills = photo.stills.len(),
                frame = self.frame.id,
                "Capture sequence complete"
            );
            return Some(photo);
        }

        debug!(
            taken,
            total = self.frame.shot_count,
            "Shot stored, starting next countdown"
        );
        self.phase = Phase::CountingDown {
            shot_index: taken,
            remaining: COUNTDOWN_SECONDS,
            next_tick: now + COUNTDOWN_TICK,
        };
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use std::time::Duration;

    fn still(shade: u8) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([shade, shade, shade, 255]),
        ))
    }

    #[test]
    fn test_countdown_ticks_once_per_second() {
        let start = Instant::now();
        let frame = catalog::find_frame("polaroid").unwrap();
        let mut seq = CaptureSequence::start(frame, start);

        assert_eq!(seq.countdown(), Some(3));
        assert_eq!(seq.advance(start), SequenceStep::Waiting);

        assert_eq!(
            seq.advance(start + Duration::from_millis(1100)),
            SequenceStep::Waiting
        );
        assert_eq!(seq.countdown(), Some(2));

        assert_eq!(
            seq.advance(start + Duration::from_millis(2100)),
            SequenceStep::Waiting
        );
        assert_eq!(seq.countdown(), Some(1));

        assert_eq!(
            seq.advance(start + Duration::from_millis(3100)),
            SequenceStep::ShotDue { shot_index: 0 }
        );
    }

    #[test]
    fn test_shot_request_stays_pending_until_completed() {
        let start = Instant::now();
        let frame = catalog::find_frame("polaroid").unwrap();
        let mut seq = CaptureSequence::start(frame, start);

        let later = start + Duration::from_secs(4);
        assert_eq!(seq.advance(later), SequenceStep::ShotDue { shot_index: 0 });
        // Still due on the next loop iteration
        assert_eq!(
            seq.advance(later + Duration::from_millis(16)),
            SequenceStep::ShotDue { shot_index: 0 }
        );
    }

    #[test]
    fn test_two_shot_sequence_emits_one_photo_in_order() {
        let start = Instant::now();
        let frame = catalog::find_frame("photo-strip").unwrap();
        assert_eq!(frame.shot_count, 2);

        let mut seq = CaptureSequence::start(frame, start);
        let mut rasterizations = 0;

        let t1 = start + Duration::from_secs(4);
        assert_eq!(seq.advance(t1), SequenceStep::ShotDue { shot_index: 0 });
        rasterizations += 1;
        assert!(seq.complete_shot(still(10), t1).is_none());

        // Second countdown runs from the first shot's completion
        assert_eq!(seq.advance(t1), SequenceStep::Waiting);
        assert_eq!(seq.countdown(), Some(3));

        let t2 = t1 + Duration::from_secs(4);
        assert_eq!(seq.advance(t2), SequenceStep::ShotDue { shot_index: 1 });
        rasterizations += 1;
        let photo = seq.complete_shot(still(20), t2).expect("photo emitted");

        assert_eq!(rasterizations, 2);
        assert_eq!(photo.stills.len(), 2);
        assert_eq!(photo.frame_id, "photo-strip");
        assert_eq!(photo.stills[0].get_pixel(0, 0)[0], 10);
        assert_eq!(photo.stills[1].get_pixel(0, 0)[0], 20);
        assert!(photo.id.starts_with("photo-"));
    }

    #[test]
    fn test_stalled_loop_catches_up_ticks() {
        let start = Instant::now();
        let frame = catalog::find_frame("polaroid").unwrap();
        let mut seq = CaptureSequence::start(frame, start);

        // A UI stall longer than the whole countdown still produces the shot
        assert_eq!(
            seq.advance(start + Duration::from_secs(30)),
            SequenceStep::ShotDue { shot_index: 0 }
        );
    }
}
