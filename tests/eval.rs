use lexrel::{error::PipelineError, model::eval::evaluate};

fn relations() -> Vec<String> {
    vec!["hypernym".to_string(), "meronym".to_string()]
}

#[test]
fn perfect_predictions_score_one() {
    let y = [0usize, 1, 1, 0];
    let metrics = evaluate(&y, &y, &relations(), false).unwrap();
    assert!((metrics.precision - 1.0).abs() < 1e-9);
    assert!((metrics.recall - 1.0).abs() < 1e-9);
    assert!((metrics.f1 - 1.0).abs() < 1e-9);
    assert_eq!(metrics.support, vec![2, 2]);
}

#[test]
fn weighted_averages_match_hand_computation() {
    let y_true = [0usize, 0, 1, 1];
    let y_pred = [0usize, 1, 1, 1];
    let metrics = evaluate(&y_true, &y_pred, &relations(), false).unwrap();

    // class 0: p=1, r=1/2, f=2/3; class 1: p=2/3, r=1, f=4/5; weights 1/2 each.
    assert!((metrics.precision - (1.0 + 2.0 / 3.0) / 2.0).abs() < 1e-9);
    assert!((metrics.recall - 0.75).abs() < 1e-9);
    assert!((metrics.f1 - (2.0 / 3.0 + 0.8) / 2.0).abs() < 1e-9);
    assert_eq!(metrics.support, vec![2, 2]);
}

#[test]
fn length_mismatch_is_a_contract_violation() {
    let err = evaluate(&[0, 1], &[0], &relations(), false).unwrap_err();
    assert!(matches!(err, PipelineError::DataContract(_)));
}

#[test]
fn out_of_range_label_is_a_contract_violation() {
    let err = evaluate(&[0, 5], &[0, 0], &relations(), false).unwrap_err();
    assert!(matches!(err, PipelineError::DataContract(_)));
}
