//! Background image loader.
//!
//! Fetches and decodes media on the rayon pool and hands decoded RGBA
//! buffers back through channels, ready for texture upload. Call
//! [`ImageLoader::poll`] once per frame.
//!
//! Failures stop here: they are logged, remembered (so a broken URL is not
//! retried every frame) and reported as [`LoadState::Failed`], which the
//! renderer draws as a placeholder.

use std::collections::{HashMap, HashSet};
use std::sync::{mpsc, Arc};

use crate::error::MediaError;
use crate::item::MediaRef;
use crate::net::media::{ImageData, MediaSource};

/// Where a media reference is in its loading life.
#[derive(Debug, PartialEq)]
pub enum LoadState<'a> {
    Unrequested,
    Pending,
    Ready(&'a ImageData),
    Failed,
}

impl LoadState<'_> {
    /// Only a finished, unsuccessful load counts; pending media is not failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed)
    }
}

/// Manages background image fetching and decoding.
pub struct ImageLoader {
    source: Arc<dyn MediaSource>,
    pending: HashMap<String, mpsc::Receiver<Result<ImageData, MediaError>>>,
    loaded: HashMap<String, ImageData>,
    failed: HashSet<String>,
}

impl ImageLoader {
    pub fn new(source: Arc<dyn MediaSource>) -> Self {
        Self {
            source,
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Request media to be fetched in the background. Repeated requests for
    /// the same reference are ignored, including ones that already failed.
    pub fn request(&mut self, media: &MediaRef) {
        let key = media.cache_key();
        if self.loaded.contains_key(key) || self.pending.contains_key(key) || self.failed.contains(key) {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let media = media.clone();

        rayon::spawn(move || {
            let result = source.fetch(&media);
            let _ = tx.send(result);
        });

        self.pending.insert(key.to_string(), rx);
    }

    /// Collect finished downloads. Returns the keys that became ready.
    pub fn poll(&mut self) -> Vec<String> {
        let mut completed = Vec::new();
        let mut ready = Vec::new();
        for (key, rx) in &self.pending {
            let result = match rx.try_recv() {
                Ok(result) => result,
                Err(mpsc::TryRecvError::Empty) => continue,
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::warn!("media worker for {} went away", key);
                    self.failed.insert(key.clone());
                    completed.push(key.clone());
                    continue;
                }
            };
            match result {
                Ok(data) => {
                    log::debug!("media ready: {} ({}x{})", key, data.width, data.height);
                    self.loaded.insert(key.clone(), data);
                    ready.push(key.clone());
                }
                Err(e) => {
                    log::warn!("media failed: {}: {}", key, e);
                    self.failed.insert(key.clone());
                }
            }
            completed.push(key.clone());
        }
        for key in completed {
            self.pending.remove(&key);
        }
        ready
    }

    /// Loaded pixels by cache key.
    pub fn get(&self, key: &str) -> Option<&ImageData> {
        self.loaded.get(key)
    }

    pub fn state(&self, media: &MediaRef) -> LoadState<'_> {
        let key = media.cache_key();
        if let Some(data) = self.loaded.get(key) {
            LoadState::Ready(data)
        } else if self.pending.contains_key(key) {
            LoadState::Pending
        } else if self.failed.contains(key) {
            LoadState::Failed
        } else {
            LoadState::Unrequested
        }
    }

    /// Number of successfully loaded images.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of images still being fetched.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}
