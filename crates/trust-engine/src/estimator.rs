//! TrustScoreEstimator: fit-once, score-many, with copy-on-write state.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rayon::prelude::*;
use tracing::debug;
use trust_core::config::EstimatorConfig;
use trust_core::constants::MAX_NEIGHBORS;
use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::{
    ClassLabel, ExpectedClasses, Labels, QueryScore, ScoreOutput, SelfMatch,
};
use trust_core::traits::AuxiliaryClassifier;

use crate::fitted_state::FittedState;
use crate::scoring;
use crate::snapshot::{class_snapshot, ClassSnapshot, FittedSnapshot};

/// The trust-score estimator.
///
/// `fit` builds a complete replacement state without holding any lock, then
/// swaps it in; `score` works on a cloned `Arc` of whatever state was current
/// when it started. Readers therefore never see a partially fitted state, and
/// a failed `fit` leaves the previous state in place. Only one `fit` may run
/// at a time.
pub struct TrustScoreEstimator {
    config: EstimatorConfig,
    auxiliary: Option<Arc<dyn AuxiliaryClassifier>>,
    state: RwLock<Option<Arc<FittedState>>>,
    /// Guard: only one fit can run at a time.
    is_fitting: AtomicBool,
}

impl std::fmt::Debug for TrustScoreEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustScoreEstimator")
            .field("config", &self.config)
            .field("has_auxiliary", &self.auxiliary.is_some())
            .field("state", &self.state)
            .field("is_fitting", &self.is_fitting)
            .finish()
    }
}

impl TrustScoreEstimator {
    /// Create an unfitted estimator.
    ///
    /// # Errors
    /// `Config` if `config` fails validation.
    pub fn new(config: EstimatorConfig) -> TrustResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            auxiliary: None,
            state: RwLock::new(None),
            is_fitting: AtomicBool::new(false),
        })
    }

    /// Use `classifier` for uncertainty filtering instead of the built-in
    /// k-NN vote.
    pub fn with_auxiliary(mut self, classifier: Arc<dyn AuxiliaryClassifier>) -> Self {
        self.auxiliary = Some(classifier);
        self
    }

    /// Restore a fitted estimator from a snapshot.
    pub fn from_snapshot(snapshot: FittedSnapshot) -> TrustResult<Self> {
        let state = FittedState::from_snapshot(snapshot)?;
        let estimator = Self::new(state.config().clone())?;
        *estimator.state.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(state));
        Ok(estimator)
    }

    /// Configuration every fit and score uses.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Check if a fit is currently running.
    pub fn is_fitting(&self) -> bool {
        self.is_fitting.load(Ordering::Relaxed)
    }

    /// Fit per-class indexes, replacing any previous state.
    ///
    /// # Errors
    /// `InvalidInput` for empty, ragged, or non-finite embeddings, a label
    /// count that differs from the embedding count, labels outside
    /// `classes`, or a class with no points (before or after filtering).
    /// `FitInProgress` if another fit is running.
    pub fn fit(
        &self,
        embeddings: &[Vec<f32>],
        labels: &Labels,
        classes: &ExpectedClasses,
    ) -> TrustResult<()> {
        // Acquire the single-execution guard.
        if self
            .is_fitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(TrustError::FitInProgress);
        }

        let dimension = embeddings.first().map(|e| e.len()).unwrap_or(0);
        let result = {
            let _span = trust_observability::fit_span!(embeddings.len(), dimension).entered();
            FittedState::build(
                embeddings,
                labels,
                classes,
                &self.config,
                self.auxiliary.as_deref(),
            )
        };

        // Release the guard.
        self.is_fitting.store(false, Ordering::SeqCst);

        let state = result?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(state));
        Ok(())
    }

    /// Score each query against the fitted state.
    ///
    /// `k` selects the neighbor rank for `d_same`; `None` uses
    /// `config.score_k`.
    ///
    /// # Errors
    /// `UnfittedEstimator` before the first successful fit, `InvalidInput`
    /// for a length mismatch, `k == 0`, or non-finite queries,
    /// `DimensionMismatch` for a query of the wrong width, and `UnknownLabel`
    /// for a predicted label with no fitted class. Nothing is scored if any
    /// query is invalid.
    pub fn score(
        &self,
        queries: &[Vec<f32>],
        predicted: &[ClassLabel],
        k: Option<usize>,
    ) -> TrustResult<ScoreOutput> {
        let state = self.current()?;
        if queries.len() != predicted.len() {
            return Err(TrustError::invalid(format!(
                "predicted_labels has length {} but queries has length {}",
                predicted.len(),
                queries.len()
            )));
        }
        let k = k.unwrap_or(state.config().score_k);
        if k == 0 || k > MAX_NEIGHBORS {
            return Err(TrustError::invalid(format!(
                "k must be between 1 and {MAX_NEIGHBORS}, got {k}"
            )));
        }
        for (i, (query, &label)) in queries.iter().zip(predicted).enumerate() {
            if query.len() != state.dimension() {
                return Err(TrustError::DimensionMismatch {
                    expected: state.dimension(),
                    actual: query.len(),
                });
            }
            if query.iter().any(|v| !v.is_finite()) {
                return Err(TrustError::invalid(format!(
                    "query {i} contains a non-finite value"
                )));
            }
            if state.class(label).is_none() {
                return Err(TrustError::UnknownLabel { label });
            }
        }

        let _span = trust_observability::score_span!(queries.len(), k).entered();
        let self_match = SelfMatch::from_exclude(state.config().exclude_self_match);
        let scores = queries
            .par_iter()
            .zip(predicted.par_iter())
            .map(|(query, &label)| scoring::score_query(&state, query, label, k, self_match))
            .collect::<TrustResult<Vec<QueryScore>>>()?;
        debug!(queries = scores.len(), k, "scored queries");
        Ok(scores.into_iter().collect())
    }

    /// Score a single query.
    pub fn score_one(
        &self,
        query: &[f32],
        predicted: ClassLabel,
        k: Option<usize>,
    ) -> TrustResult<QueryScore> {
        let out = self.score(&[query.to_vec()], &[predicted], k)?;
        out.get(0)
            .ok_or_else(|| TrustError::invalid("scoring produced no result"))
    }

    pub fn is_fitted(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Width of the fitted embeddings.
    pub fn dimension(&self) -> TrustResult<usize> {
        Ok(self.current()?.dimension())
    }

    /// Fitted class labels, ascending.
    pub fn class_labels(&self) -> TrustResult<Vec<ClassLabel>> {
        Ok(self.current()?.classes().keys().copied().collect())
    }

    /// Retained point count per class.
    pub fn class_sizes(&self) -> TrustResult<BTreeMap<ClassLabel, usize>> {
        Ok(self
            .current()?
            .classes()
            .iter()
            .map(|(&label, class)| (label, class.len()))
            .collect())
    }

    /// Retained points of one class with their source indices.
    pub fn class_points(&self, label: ClassLabel) -> TrustResult<ClassSnapshot> {
        let state = self.current()?;
        let class = state
            .class(label)
            .ok_or(TrustError::UnknownLabel { label })?;
        Ok(class_snapshot(class))
    }

    /// Serializable copy of the fitted state.
    pub fn snapshot(&self) -> TrustResult<FittedSnapshot> {
        Ok(self.current()?.to_snapshot())
    }

    /// The current state, cloned out from under the read lock.
    fn current(&self) -> TrustResult<Arc<FittedState>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TrustError::UnfittedEstimator)
    }
}

impl Default for TrustScoreEstimator {
    fn default() -> Self {
        Self {
            config: EstimatorConfig::default(),
            auxiliary: None,
            state: RwLock::new(None),
            is_fitting: AtomicBool::new(false),
        }
    }
}
