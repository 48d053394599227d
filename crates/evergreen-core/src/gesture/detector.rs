//! Capture/detector boundary.
//!
//! A [`DetectorSource`] is opened on its own thread and polled one frame at a
//! time; the next detection only starts after the previous one returned, so
//! the loop never queues work faster than it can consume it. Frames reach
//! the tick loop through a one-slot [`GestureFeed`] channel, so the detector
//! blocks until the previous frame was taken. The tick loop stays the single
//! writer of the scene context. The detector is dropped when the thread
//! exits, on every path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use super::landmarks::HandLandmarks;

/// Frames buffered between the detector thread and the tick loop.
const FEED_CAPACITY: usize = 1;

/// Poll period of a finished, non-looping script.
const EXHAUSTED_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("hand landmark model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("landmark inference failed: {0}")]
    Inference(String),
}

/// A running hand-landmark detector. Resources are released on drop.
pub trait LandmarkDetector: Send {
    /// Block until the next frame is processed. `Ok(None)` means no hand.
    fn detect(&mut self) -> Result<Option<HandLandmarks>, DetectorError>;
}

/// Anything that can acquire a [`LandmarkDetector`].
pub trait DetectorSource: Send + 'static {
    type Detector: LandmarkDetector;

    fn open(self) -> Result<Self::Detector, DetectorError>;
}

#[derive(Debug)]
pub enum FeedEvent {
    Frame(Option<HandLandmarks>),
    /// The detector could not be opened or stopped working; no more frames follow.
    Unavailable(DetectorError),
}

/// Receiving end of a detector thread.
pub struct GestureFeed {
    rx: Receiver<FeedEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    available: bool,
}

impl GestureFeed {
    pub fn spawn<S: DetectorSource>(source: S) -> Self {
        let (tx, rx) = mpsc::sync_channel(FEED_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("gesture-detector".into())
            .spawn(move || {
                let mut detector = match source.open() {
                    Ok(d) => d,
                    Err(e) => {
                        log::warn!("[detector] setup failed: {e}; manual control only");
                        _ = tx.send(FeedEvent::Unavailable(e));
                        return;
                    }
                };
                log::info!("[detector] ready");
                // A blocked send returns once the feed drops its receiver.
                while !stop_flag.load(Ordering::Relaxed) {
                    match detector.detect() {
                        Ok(frame) => {
                            if tx.send(FeedEvent::Frame(frame)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            log::warn!("[detector] lost: {e}; manual control only");
                            _ = tx.send(FeedEvent::Unavailable(e));
                            break;
                        }
                    }
                }
                log::debug!("[detector] released");
            });
        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("[detector] could not start thread: {e}");
                None
            }
        };
        let available = handle.is_some();
        Self {
            rx,
            stop,
            handle,
            available,
        }
    }

    /// Next pending event without blocking.
    pub fn try_next(&mut self) -> Option<FeedEvent> {
        match self.rx.try_recv() {
            Ok(event) => {
                if matches!(event, FeedEvent::Unavailable(_)) {
                    self.available = false;
                }
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.available = false;
                None
            }
        }
    }

    /// False once the detector failed or its thread ended.
    pub fn is_available(&self) -> bool {
        self.available
    }
}

impl Drop for GestureFeed {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        drop(std::mem::replace(&mut self.rx, mpsc::sync_channel(0).1));
        if let Some(handle) = self.handle.take() {
            _ = handle.join();
        }
    }
}

/// Replays a fixed list of frames, one per `interval`.
///
/// Once a non-looping script runs out it keeps reporting no hand at a slow
/// poll rate.
pub struct ScriptedDetector {
    frames: Vec<Option<HandLandmarks>>,
    cursor: usize,
    delivered: usize,
    interval: Duration,
    looping: bool,
    fail_after: Option<(usize, DetectorError)>,
}

impl LandmarkDetector for ScriptedDetector {
    fn detect(&mut self) -> Result<Option<HandLandmarks>, DetectorError> {
        if self
            .fail_after
            .as_ref()
            .is_some_and(|(after, _)| self.delivered >= *after)
        {
            if let Some((_, e)) = self.fail_after.take() {
                return Err(e);
            }
        }
        if self.cursor >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                thread::sleep(self.interval.max(EXHAUSTED_POLL));
                return Ok(None);
            }
            self.cursor = 0;
        }
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        let frame = self.frames[self.cursor].clone();
        self.cursor += 1;
        self.delivered += 1;
        Ok(frame)
    }
}

/// Source for a [`ScriptedDetector`], optionally failing on open or mid-run.
pub struct ScriptedSource {
    pub frames: Vec<Option<HandLandmarks>>,
    pub interval: Duration,
    pub looping: bool,
    pub fail_with: Option<DetectorError>,
    pub fail_after: Option<(usize, DetectorError)>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Option<HandLandmarks>>, interval: Duration) -> Self {
        Self {
            frames,
            interval,
            looping: false,
            fail_with: None,
            fail_after: None,
        }
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Lose the detector with `error` after `frames` frames were delivered.
    pub fn fail_after(mut self, frames: usize, error: DetectorError) -> Self {
        self.fail_after = Some((frames, error));
        self
    }

    pub fn failing(error: DetectorError) -> Self {
        Self {
            frames: Vec::new(),
            interval: Duration::ZERO,
            looping: false,
            fail_with: Some(error),
            fail_after: None,
        }
    }
}

impl DetectorSource for ScriptedSource {
    type Detector = ScriptedDetector;

    fn open(self) -> Result<ScriptedDetector, DetectorError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        Ok(ScriptedDetector {
            frames: self.frames,
            cursor: 0,
            delivered: 0,
            interval: self.interval,
            looping: self.looping,
            fail_after: self.fail_after,
        })
    }
}
