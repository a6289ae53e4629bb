//! Precision/recall/F1 computation over relation predictions.

use tracing::info;

use crate::error::PipelineError;

/// Support-weighted averages plus per-relation support counts.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: Vec<usize>,
}

/// Score predictions against gold labels over the closed relation set.
///
/// Averages are weighted by gold support, so relations absent from the
/// gold labels do not dilute the score. `full_report` additionally logs a
/// per-relation table.
pub fn evaluate(
    y_true: &[usize],
    y_pred: &[usize],
    relations: &[String],
    full_report: bool,
) -> Result<Metrics, PipelineError> {
    if y_true.len() != y_pred.len() {
        return Err(PipelineError::DataContract(format!(
            "evaluated {} gold labels against {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }

    let n_classes = relations.len();
    let mut tp = vec![0usize; n_classes];
    let mut fp = vec![0usize; n_classes];
    let mut fn_ = vec![0usize; n_classes];
    let mut support = vec![0usize; n_classes];

    for (&gold, &pred) in y_true.iter().zip(y_pred) {
        if gold >= n_classes || pred >= n_classes {
            return Err(PipelineError::DataContract(format!(
                "label id out of range: gold={gold}, pred={pred}, classes={n_classes}"
            )));
        }
        support[gold] += 1;
        if gold == pred {
            tp[gold] += 1;
        } else {
            fp[pred] += 1;
            fn_[gold] += 1;
        }
    }

    let total = y_true.len() as f64;
    let mut precision = 0.0;
    let mut recall = 0.0;
    let mut f1 = 0.0;
    for c in 0..n_classes {
        let p = ratio(tp[c], tp[c] + fp[c]);
        let r = ratio(tp[c], tp[c] + fn_[c]);
        let f = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };
        if full_report {
            info!(
                relation = %relations[c],
                precision = p,
                recall = r,
                f1 = f,
                support = support[c],
                "per-relation metrics"
            );
        }
        let weight = support[c] as f64 / total.max(1.0);
        precision += weight * p;
        recall += weight * r;
        f1 += weight * f;
    }

    Ok(Metrics {
        precision,
        recall,
        f1,
        support,
    })
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}
