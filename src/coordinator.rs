//! Busy indicator bookkeeping around a single in-flight save.
//!
//! Runs on the UI thread: `on_double_tap` starts a save, `poll` is called once
//! per frame to pick up the result. While a save is pending the indicator is
//! visible and further double taps are dropped.

use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc,
};

use log::{debug, info, warn};

use crate::{
    catalog::ImageRecord,
    error::SaveError,
    saver::{SaveRequest, Saver},
    store::{MediaStore, SavedMedia},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Succeeded {
        target_index: usize,
        media: SavedMedia,
    },
    Failed {
        target_index: usize,
        error: SaveError,
    },
}

impl SaveOutcome {
    pub fn target_index(&self) -> usize {
        match self {
            SaveOutcome::Succeeded { target_index, .. } | SaveOutcome::Failed { target_index, .. } => {
                *target_index
            }
        }
    }
}

/// Notifications delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveEvent {
    Visibility(bool),
    Outcome(SaveOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Started,
    /// A save was already running; the tap is dropped, not queued.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SaveSession {
    pub target_index: usize,
    pub ticket: u64,
}

pub struct SaveCoordinator {
    saver: Saver,
    session: Option<SaveSession>,
    next_ticket: u64,
    subscribers: Vec<Sender<SaveEvent>>,
}

impl SaveCoordinator {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            saver: Saver::new(store),
            session: None,
            next_ticket: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<SaveEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn is_visible(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&SaveSession> {
        self.session.as_ref()
    }

    /// Starts saving `records[target_index]` unless a save is already running.
    pub fn on_double_tap(
        &mut self,
        target_index: usize,
        records: &[ImageRecord],
    ) -> Result<Trigger, SaveError> {
        if let Some(active) = &self.session {
            debug!(
                "double tap on #{target_index} ignored, #{} still saving",
                active.target_index
            );
            return Ok(Trigger::Ignored);
        }
        let record = records
            .get(target_index)
            .ok_or(SaveError::UnknownTarget(target_index))?;

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.session = Some(SaveSession {
            target_index,
            ticket,
        });
        self.publish(SaveEvent::Visibility(true));

        let request = SaveRequest {
            ticket,
            record: record.clone(),
        };
        if let Err(error) = self.saver.queue_save(request) {
            self.settle(Err(error.clone()));
            return Err(error);
        }
        info!("saving #{target_index} ({})", record.source.display());
        Ok(Trigger::Started)
    }

    /// Collects a finished save, if any, and hides the indicator.
    pub fn poll(&mut self) -> Option<SaveOutcome> {
        let mut outcome = None;
        for status in self.saver.check_completions() {
            let is_current = self
                .session
                .as_ref()
                .is_some_and(|session| session.ticket == status.ticket);
            if !is_current {
                warn!("dropping result of stale save #{}", status.ticket);
                continue;
            }
            debug!("save #{} settled after {:?}", status.ticket, status.elapsed);
            outcome = self.settle(status.result);
        }
        outcome
    }

    fn settle(&mut self, result: Result<SavedMedia, SaveError>) -> Option<SaveOutcome> {
        let session = self.session.take()?;
        let outcome = match result {
            Ok(media) => SaveOutcome::Succeeded {
                target_index: session.target_index,
                media,
            },
            Err(error) => {
                warn!("saving #{} failed: {error}", session.target_index);
                SaveOutcome::Failed {
                    target_index: session.target_index,
                    error,
                }
            }
        };
        self.publish(SaveEvent::Visibility(false));
        self.publish(SaveEvent::Outcome(outcome.clone()));
        Some(outcome)
    }

    fn publish(&mut self, event: SaveEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
