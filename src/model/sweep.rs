//! Hyperparameter sweep and model selection.

use std::path::Path;

use tracing::info;

use crate::{
    error::PipelineError,
    model::{
        artifact,
        eval::{self, Metrics},
    },
    nlp::{paths::PathCounts, IndexTables},
};

/// One (alpha, dropout) combination in the sweep grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub alpha: f64,
    pub dropout: f64,
}

/// Cartesian product of the two hyperparameter axes, in input order.
/// Iteration order is the tie-break order for selection.
pub fn grid(alphas: &[f64], dropouts: &[f64]) -> Vec<GridPoint> {
    alphas
        .iter()
        .flat_map(|&alpha| dropouts.iter().map(move |&dropout| GridPoint { alpha, dropout }))
        .collect()
}

/// Contract every sweep candidate must satisfy. The concrete classifier
/// implements this; tests script it.
pub trait SweepModel {
    fn fit(&mut self, instances: &[PathCounts], y: &[usize]) -> Result<(), PipelineError>;
    fn predict(&self, instances: &[PathCounts]) -> Result<Vec<usize>, PipelineError>;
    fn save_model(&self, path: &Path, tables: &IndexTables) -> Result<(), PipelineError>;
}

/// The three feature matrices and label vectors the sweep trains and
/// scores against.
#[derive(Debug, Clone, Copy)]
pub struct SweepData<'a> {
    pub x_train: &'a [PathCounts],
    pub y_train: &'a [usize],
    pub x_val: &'a [PathCounts],
    pub y_val: &'a [usize],
    pub x_test: &'a [PathCounts],
    pub y_test: &'a [usize],
}

/// Outcome of a completed sweep.
#[derive(Debug)]
pub struct SweepOutcome {
    pub best: GridPoint,
    pub best_val_f1: f64,
    pub val_scores: Vec<(GridPoint, f64)>,
    pub test_metrics: Metrics,
}

/// Train and score one candidate per grid point, persist every candidate
/// immediately, then select the argmax-F1 point.
///
/// Each candidate is written to `<prefix>.<dropout>` right after scoring,
/// so a crash mid-sweep preserves the already-trained models. Selection
/// uses strictly-greater comparison, so ties keep the earliest-evaluated
/// point. The winner is persisted again under the bare prefix and scored
/// once on the test split with a full report. Any fit or predict failure
/// aborts the remaining sweep: partial grids are never compared.
pub fn run_sweep<M, F>(
    points: &[GridPoint],
    mut factory: F,
    data: SweepData<'_>,
    relations: &[String],
    tables: &IndexTables,
    model_prefix: &Path,
) -> Result<SweepOutcome, PipelineError>
where
    M: SweepModel,
    F: FnMut(GridPoint) -> M,
{
    if points.is_empty() {
        return Err(PipelineError::DataContract(
            "hyperparameter grid is empty".to_string(),
        ));
    }

    let mut models = Vec::with_capacity(points.len());
    let mut val_scores = Vec::with_capacity(points.len());

    for &point in points {
        info!(alpha = point.alpha, dropout = point.dropout, "training grid point");
        let mut model = factory(point);
        model.fit(data.x_train, data.y_train)?;

        let pred = model.predict(data.x_val)?;
        let metrics = eval::evaluate(data.y_val, &pred, relations, false)?;
        info!(
            alpha = point.alpha,
            dropout = point.dropout,
            precision = metrics.precision,
            recall = metrics.recall,
            f1 = metrics.f1,
            "validation metrics"
        );

        model.save_model(&artifact::intermediate_path(model_prefix, point.dropout), tables)?;
        val_scores.push((point, metrics.f1));
        models.push(model);
    }

    let mut best_index = 0;
    for (i, &(_, f1)) in val_scores.iter().enumerate() {
        if f1 > val_scores[best_index].1 {
            best_index = i;
        }
    }
    let (best, best_val_f1) = val_scores[best_index];
    info!(
        alpha = best.alpha,
        dropout = best.dropout,
        f1 = best_val_f1,
        "selected best hyperparameters"
    );

    let winner = &models[best_index];
    winner.save_model(model_prefix, tables)?;

    let pred = winner.predict(data.x_test)?;
    let test_metrics = eval::evaluate(data.y_test, &pred, relations, true)?;
    info!(
        precision = test_metrics.precision,
        recall = test_metrics.recall,
        f1 = test_metrics.f1,
        "test metrics"
    );

    Ok(SweepOutcome {
        best,
        best_val_f1,
        val_scores,
        test_metrics,
    })
}
