//! Channel-backed frame sink

use incubator_core::TickFrame;
use log::debug;
use tokio::sync::mpsc;

use crate::FrameSink;

/// Forwards frames into a bounded mpsc channel
///
/// A full or closed channel drops the frame; the tick task never waits on
/// the renderer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<TickFrame>,
}

impl ChannelSink {
    /// Sink plus the receiver the renderer reads from
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<TickFrame>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Wrap an existing sender
    pub fn new(tx: mpsc::Sender<TickFrame>) -> Self {
        Self { tx }
    }
}

impl FrameSink for ChannelSink {
    fn publish(&mut self, frame: TickFrame) {
        if let Err(err) = self.tx.try_send(frame) {
            debug!("Dropped frame: {err}");
        }
    }
}
