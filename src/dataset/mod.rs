pub mod loader;
pub mod models;

use std::{collections::HashMap, path::Path, sync::Arc};

use rand::{Rng, seq::SliceRandom};

use crate::error::DatasetError;
pub use models::{PredictionView, Record, TextRecord};

/// Read-only home of the results and text tables.
///
/// Scores are formatted once in [`DatasetStore::new`]; nothing mutates the
/// tables afterwards, so the store is shared between requests without locks.
#[derive(Debug)]
pub struct DatasetStore {
    results: Vec<Record>,
    index: HashMap<i64, usize>,
    text: Arc<[TextRecord]>,
}

impl DatasetStore {
    pub fn new(mut results: Vec<Record>, mut text: Vec<TextRecord>) -> Self {
        if !loader::format_response_scores("results", &mut results) {
            tracing::warn!("results table keeps unformatted response_score values");
        }
        if !loader::format_response_scores("text", &mut text) {
            tracing::warn!("text table keeps unformatted response_score values");
        }

        let mut index = HashMap::with_capacity(results.len());
        for (position, record) in results.iter().enumerate() {
            // first occurrence wins for duplicated ids
            index.entry(record.id).or_insert(position);
        }

        Self {
            results,
            index,
            text: text.into(),
        }
    }

    pub fn load(result_path: &Path, text_path: &Path) -> Result<Self, DatasetError> {
        let results = loader::load_results(result_path)?;
        let text = loader::load_text(text_path)?;
        tracing::info!(
            "Data loaded successfully: {} result rows from {}, {} text rows from {}",
            results.len(),
            result_path.display(),
            text.len(),
            text_path.display()
        );

        Ok(Self::new(results, text))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn sample_random(&self, n: usize) -> Result<Vec<Record>, DatasetError> {
        self.sample_random_with(n, &mut rand::thread_rng())
    }

    /// Uniform sample without replacement. Never clamps: asking for more
    /// rows than exist is an error.
    pub fn sample_random_with<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Record>, DatasetError> {
        if n > self.results.len() {
            return Err(DatasetError::OutOfRange {
                requested: n,
                available: self.results.len(),
            });
        }

        Ok(self.results.choose_multiple(rng, n).cloned().collect())
    }

    pub fn find_by_id(&self, id: i64) -> Result<PredictionView, DatasetError> {
        self.index
            .get(&id)
            .map(|&position| self.results[position].prediction_view())
            .ok_or(DatasetError::NotFound(id))
    }

    pub fn full_text_projection(&self) -> Arc<[TextRecord]> {
        Arc::clone(&self.text)
    }
}
