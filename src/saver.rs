use std::{
    sync::{
        mpsc::{self, Receiver, Sender, TryRecvError},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use log::{debug, warn};

use crate::{
    catalog::ImageRecord,
    error::SaveError,
    store::{MediaStore, SavedMedia},
};

pub struct SaveRequest {
    pub ticket: u64,
    pub record: ImageRecord,
}

pub struct SaveStatus {
    pub ticket: u64,
    pub result: Result<SavedMedia, SaveError>,
    pub elapsed: Duration,
}

/// Runs media store saves on a background thread and hands results back to
/// whoever polls `check_completions`.
pub struct Saver {
    save_tx: Sender<SaveRequest>,
    save_status_rx: Receiver<SaveStatus>,
    pending_saves: Vec<u64>,
}

impl Saver {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        let (save_tx, save_rx) = mpsc::channel();
        let (save_status_tx, save_status_rx) = mpsc::channel();

        Self::spawn_saver_thread(store, save_rx, save_status_tx);

        Self {
            save_tx,
            save_status_rx,
            pending_saves: Vec::new(),
        }
    }

    fn spawn_saver_thread(
        store: Arc<dyn MediaStore>,
        rx: Receiver<SaveRequest>,
        tx: Sender<SaveStatus>,
    ) {
        thread::spawn(move || {
            while let Ok(req) = rx.recv() {
                let start = Instant::now();
                debug!("save #{} started for {}", req.ticket, req.record.source.display());
                let result = store.save(&req.record);
                let status = SaveStatus {
                    ticket: req.ticket,
                    result,
                    elapsed: start.elapsed(),
                };
                if tx.send(status).is_err() {
                    break;
                }
            }
        });
    }

    pub fn queue_save(&mut self, request: SaveRequest) -> Result<(), SaveError> {
        let ticket = request.ticket;
        self.save_tx
            .send(request)
            .map_err(|e| SaveError::Queue(e.to_string()))?;
        self.pending_saves.push(ticket);
        Ok(())
    }

    pub fn check_completions(&mut self) -> Vec<SaveStatus> {
        let mut completed = Vec::new();
        loop {
            match self.save_status_rx.try_recv() {
                Ok(status) => {
                    self.pending_saves.retain(|t| *t != status.ticket);
                    completed.push(status);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Worker died mid-save; settle what it still owed us
                    for ticket in self.pending_saves.drain(..) {
                        warn!("save #{ticket} lost with its worker");
                        completed.push(SaveStatus {
                            ticket,
                            result: Err(SaveError::WorkerGone),
                            elapsed: Duration::ZERO,
                        });
                    }
                    break;
                }
            }
        }
        completed
    }
}
