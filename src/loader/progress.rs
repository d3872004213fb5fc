// src/loader/progress.rs

use std::cell::Cell;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use log::debug;

/// 進捗イベント 1つ分。`percent` は 0..=100。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    pub percent: u8,
    pub message: String,
}

/// 進捗イベントを送る側。
///
/// 受け取る側から見た `percent` は絶対に減らない。前より小さい値が来たら前の値に揃える。
#[derive(Debug, Default)]
pub struct ProgressReporter {
    sender: Option<UnboundedSender<LoadProgress>>,
    last_percent: Cell<u8>,
}

impl ProgressReporter {
    /// 送信側と受信側のペアを作る
    pub fn channel() -> (Self, UnboundedReceiver<LoadProgress>) {
        let (sender, receiver) = mpsc::unbounded();
        (Self { sender: Some(sender), last_percent: Cell::new(0) }, receiver)
    }

    /// どこにも送らないレポーター
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn report(&self, percent: u8, message: impl Into<String>) {
        let percent = percent.min(100).max(self.last_percent.get());
        self.last_percent.set(percent);

        let Some(sender) = &self.sender else {
            return;
        };
        let event = LoadProgress { percent, message: message.into() };
        if let Err(e) = sender.unbounded_send(event) {
            // 受信側がいなくなっただけなので読み込みは続ける
            debug!("ProgressReporter: receiver dropped ({})", e);
        }
    }

    pub fn last_percent(&self) -> u8 {
        self.last_percent.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::StreamExt;

    // 送信側を drop してから呼ぶこと
    fn drain(receiver: UnboundedReceiver<LoadProgress>) -> Vec<u8> {
        block_on(receiver.map(|event| event.percent).collect())
    }

    #[test]
    fn never_goes_backwards() {
        let (reporter, receiver) = ProgressReporter::channel();
        reporter.report(10, "a");
        reporter.report(50, "b");
        reporter.report(30, "c");
        reporter.report(120, "d");
        assert_eq!(reporter.last_percent(), 100);
        drop(reporter);
        assert_eq!(drain(receiver), vec![10, 50, 50, 100]);
    }

    #[test]
    fn dropped_receiver_is_not_an_error() {
        let (reporter, receiver) = ProgressReporter::channel();
        drop(receiver);
        reporter.report(40, "nobody listens");
        assert_eq!(reporter.last_percent(), 40);
    }

    #[test]
    fn silent_reporter_still_tracks_percent() {
        let reporter = ProgressReporter::silent();
        reporter.report(60, "x");
        assert_eq!(reporter.last_percent(), 60);
    }
}
