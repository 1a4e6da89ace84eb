use log::{info, warn};
use rand::Rng;

use crate::{
    catalog::{ImageRecord, ImageSource},
    error::RefreshError,
    sampler::Sampler,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// The handful of images currently on display.
#[derive(Debug, Clone)]
pub struct Gallery {
    records: Vec<ImageRecord>,
    current_index: usize,
    state: LoadState,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            current_index: 0,
            state: LoadState::Loading,
        }
    }

    /// Drops the displayed set and goes back to loading.
    pub fn initialize(&mut self) {
        self.records.clear();
        self.current_index = 0;
        self.state = LoadState::Loading;
    }

    /// Fetches the full list and keeps `count` randomly chosen entries, in the
    /// order they were drawn.
    pub fn refresh<S, R>(
        &mut self,
        source: &S,
        sampler: &mut Sampler<R>,
        count: usize,
    ) -> Result<&[ImageRecord], RefreshError>
    where
        S: ImageSource + ?Sized,
        R: Rng,
    {
        self.initialize();
        match Self::pick(source, sampler, count) {
            Ok(records) => {
                info!("showing {} images", records.len());
                self.records = records;
                self.state = LoadState::Ready;
                Ok(&self.records)
            }
            Err(err) => {
                warn!("refresh failed: {err:#}");
                self.state = LoadState::Failed(format!("{err:#}"));
                Err(err)
            }
        }
    }

    fn pick<S, R>(
        source: &S,
        sampler: &mut Sampler<R>,
        count: usize,
    ) -> Result<Vec<ImageRecord>, RefreshError>
    where
        S: ImageSource + ?Sized,
        R: Rng,
    {
        let all = source.fetch()?;
        let picked = sampler.sample(count, 0, all.len())?;
        Ok(picked.iter().map(|&idx| all[idx].clone()).collect())
    }

    /// Records which image the carousel came to rest on. Indices outside the
    /// displayed set are ignored.
    pub fn on_scroll_settled(&mut self, index: usize) {
        if index < self.records.len() {
            self.current_index = index;
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&ImageRecord> {
        self.records.get(self.current_index)
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }
}
