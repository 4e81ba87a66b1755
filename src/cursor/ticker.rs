//! Periodic cursor recomputation.
//!
//! A [`CursorTicker`] owns one tokio task that recomputes the
//! [`LiveCursor`] on a fixed period and publishes it on a watch channel.
//! Changing the viewed date recomputes immediately. The task ends on
//! [`CursorTicker::stop`] and is aborted when the ticker is dropped, so a
//! torn-down view never leaves a recurring task behind.

use chrono::NaiveDate;
use log::{debug, trace, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{Clock, LiveCursor};
use crate::config::LayoutConfig;
use crate::error::{Result, TimelineError};

/// Handle to a running cursor tick.
#[derive(Debug)]
pub struct CursorTicker {
    cursor: watch::Receiver<LiveCursor>,
    viewed: watch::Sender<NaiveDate>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl CursorTicker {
    /// Starts ticking every `period` for `viewed_date`.
    ///
    /// The first value is computed synchronously, so [`current`](Self::current)
    /// is valid immediately.
    ///
    /// # Errors
    /// Returns [`TimelineError::InvalidConfig`] if `period` is zero.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start(clock: Arc<dyn Clock>, viewed_date: NaiveDate, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(TimelineError::InvalidConfig {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        let initial = LiveCursor::compute(viewed_date, clock.now());
        let (cursor_tx, cursor_rx) = watch::channel(initial);
        let (viewed_tx, viewed_rx) = watch::channel(viewed_date);
        let (stop_tx, stop_rx) = oneshot::channel();

        debug!("live cursor ticker started for {viewed_date} every {period:?}");
        let task = tokio::spawn(run(clock, period, cursor_tx, viewed_rx, stop_rx));

        Ok(Self {
            cursor: cursor_rx,
            viewed: viewed_tx,
            stop: Some(stop_tx),
            task: Some(task),
        })
    }

    /// Starts ticking at the configured period.
    ///
    /// # Errors
    /// Returns [`TimelineError::InvalidConfig`] if `config` fails validation.
    pub fn from_config(
        clock: Arc<dyn Clock>,
        viewed_date: NaiveDate,
        config: &LayoutConfig,
    ) -> Result<Self> {
        config.validate()?;
        Self::start(clock, viewed_date, config.tick_interval())
    }

    /// Latest published cursor.
    pub fn current(&self) -> LiveCursor {
        *self.cursor.borrow()
    }

    /// Receiver notified on every recompute.
    pub fn subscribe(&self) -> watch::Receiver<LiveCursor> {
        self.cursor.clone()
    }

    /// Re-targets the cursor at another day.
    pub fn set_viewed_date(&self, date: NaiveDate) {
        self.viewed.send_replace(date);
    }

    /// Day currently targeted.
    pub fn viewed_date(&self) -> NaiveDate {
        *self.viewed.borrow()
    }

    /// Stops the tick and waits for the task to finish.
    ///
    /// Subscribers see their channel close afterwards.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("live cursor ticker ended abnormally: {err}");
            }
        }
    }
}

impl Drop for CursorTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run(
    clock: Arc<dyn Clock>,
    period: Duration,
    cursor_tx: watch::Sender<LiveCursor>,
    mut viewed_rx: watch::Receiver<NaiveDate>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            _ = interval.tick() => {}
            changed = viewed_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let viewed = *viewed_rx.borrow_and_update();
        let cursor = LiveCursor::compute(viewed, clock.now());
        if cursor_tx.send(cursor).is_err() {
            trace!("live cursor has no subscribers left");
            break;
        }
    }

    debug!("live cursor ticker stopped");
}
