//! Fold-by-fold precision curves for model confidence and trust score.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::{debug, info};
use trust_core::config::{EstimatorConfig, EvaluationConfig};
use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::{ClassLabel, ExpectedClasses, Labels};
use trust_core::traits::{Classifier, Reducer};
use trust_engine::TrustScoreEstimator;

use crate::precision::precision_at_percentiles;
use crate::split::StratifiedShuffleSplit;

pub const MODEL_CONFIDENCE: &str = "model confidence";
pub const TRUST_SCORE: &str = "trust score";

/// Aggregate precision at one percentile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub percentile: f64,
    /// Mean precision over the folds that produced a value.
    pub mean: Option<f64>,
    /// Population standard deviation over those folds divided by `sqrt(n)`.
    pub stderr: Option<f64>,
    pub folds: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionCurve {
    pub name: String,
    pub points: Vec<CurvePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionReport {
    pub classifier: String,
    pub predict_correct: bool,
    pub folds: usize,
    /// Mean fraction of held-out points that were targets (correct
    /// predictions, or mistakes when `predict_correct` is false).
    pub target_fraction: f64,
    pub curves: Vec<PrecisionCurve>,
}

impl PrecisionReport {
    pub fn curve(&self, name: &str) -> Option<&PrecisionCurve> {
        self.curves.iter().find(|c| c.name == name)
    }

    pub fn to_json(&self) -> TrustResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the classifier and a freshly fitted estimator on each stratified
/// split, then compares how well their scores pick out the target points.
#[derive(Debug, Clone)]
pub struct PrecisionCurveRunner {
    evaluation: EvaluationConfig,
    estimator: EstimatorConfig,
    classes: ExpectedClasses,
}

impl PrecisionCurveRunner {
    /// # Errors
    /// `Config` if either config fails validation.
    pub fn new(evaluation: EvaluationConfig, estimator: EstimatorConfig) -> TrustResult<Self> {
        evaluation.validate()?;
        estimator.validate()?;
        Ok(Self {
            evaluation,
            estimator,
            classes: ExpectedClasses::Observed,
        })
    }

    /// Class set passed to every per-fold `fit`.
    pub fn with_classes(mut self, classes: ExpectedClasses) -> Self {
        self.classes = classes;
        self
    }

    pub fn evaluation(&self) -> &EvaluationConfig {
        &self.evaluation
    }

    /// Evaluate `classifier` on `features`.
    ///
    /// `reducer` embeds the features the estimator sees; the classifier
    /// always gets the raw features.
    ///
    /// # Errors
    /// Propagates split, classifier, reducer, and estimator failures.
    /// `Classifier` if the classifier returns the wrong number of
    /// predictions.
    pub fn run(
        &self,
        classifier: &mut dyn Classifier,
        reducer: &mut dyn Reducer,
        features: &[Vec<f32>],
        labels: &Labels,
    ) -> TrustResult<PrecisionReport> {
        if labels.len() != features.len() {
            return Err(TrustError::invalid(format!(
                "labels has length {} but features has length {}",
                labels.len(),
                features.len()
            )));
        }
        let labels = labels.decode()?;
        let splits = StratifiedShuffleSplit::new(
            self.evaluation.n_folds,
            self.evaluation.test_size,
            self.evaluation.seed,
        )
        .split(&labels)?;

        let percentiles = &self.evaluation.percentiles;
        let names = [MODEL_CONFIDENCE, TRUST_SCORE];
        // samples[curve][percentile] holds one precision per fold.
        let mut samples = vec![vec![Vec::new(); percentiles.len()]; names.len()];
        let mut target_fractions = Vec::with_capacity(splits.len());

        for (fold, split) in splits.iter().enumerate() {
            let _span = trust_observability::evaluation_span!(fold).entered();
            let train_x = gather(features, &split.train);
            let train_y = gather(&labels, &split.train);
            let test_x = gather(features, &split.test);
            let test_y = gather(&labels, &split.test);

            let predictions = classifier.fit_predict(&train_x, &train_y, &test_x)?;
            if predictions.len() != test_x.len() {
                return Err(TrustError::Classifier {
                    reason: format!(
                        "{} returned {} predictions for {} points",
                        classifier.name(),
                        predictions.len(),
                        test_x.len()
                    ),
                });
            }
            let predicted: Vec<ClassLabel> = predictions.iter().map(|p| p.label).collect();
            let likelihood: Vec<f64> = predictions.iter().map(|p| p.likelihood).collect();
            let targets: Vec<bool> = predicted
                .iter()
                .zip(&test_y)
                .map(|(p, y)| (p == y) == self.evaluation.predict_correct)
                .collect();

            let train_embedded = reducer.fit_transform(&train_x, self.evaluation.seed)?;
            let test_embedded = reducer.transform(&test_x)?;
            let estimator = TrustScoreEstimator::new(self.estimator.clone())?;
            estimator.fit(
                &train_embedded,
                &Labels::Integer(train_y),
                &self.classes,
            )?;
            let trust = estimator
                .score(&test_embedded, &predicted, Some(self.evaluation.score_k))?
                .trust_scores;

            let rows = precision_at_percentiles(
                &[likelihood, trust],
                &targets,
                percentiles,
                self.evaluation.predict_correct,
            )?;
            for (p, row) in rows.into_iter().enumerate() {
                if let Some(row) = row {
                    for (curve, value) in row.into_iter().enumerate() {
                        samples[curve][p].push(value);
                    }
                }
            }

            let target_count = targets.iter().filter(|t| **t).count();
            let fraction = target_count as f64 / targets.len() as f64;
            target_fractions.push(fraction);
            debug!(fold, targets = target_count, fraction, "evaluated fold");
        }

        let curves = names
            .iter()
            .zip(samples)
            .map(|(name, per_percentile)| PrecisionCurve {
                name: (*name).to_string(),
                points: percentiles
                    .iter()
                    .zip(per_percentile)
                    .map(|(&percentile, values)| summarize(percentile, &values))
                    .collect(),
            })
            .collect();
        let target_fraction = target_fractions.iter().mean();

        info!(
            classifier = classifier.name(),
            folds = splits.len(),
            target_fraction,
            "precision curves complete"
        );
        Ok(PrecisionReport {
            classifier: classifier.name().to_string(),
            predict_correct: self.evaluation.predict_correct,
            folds: splits.len(),
            target_fraction,
            curves,
        })
    }
}

fn gather<T: Clone>(rows: &[T], positions: &[usize]) -> Vec<T> {
    positions.iter().map(|&i| rows[i].clone()).collect()
}

fn summarize(percentile: f64, values: &[f64]) -> CurvePoint {
    if values.is_empty() {
        return CurvePoint {
            percentile,
            mean: None,
            stderr: None,
            folds: 0,
        };
    }
    let std = values.iter().population_std_dev();
    CurvePoint {
        percentile,
        mean: Some(values.iter().mean()),
        stderr: Some(std / (values.len() as f64).sqrt()),
        folds: values.len(),
    }
}
