use super::error::ClassifierError;

/// Converts raw logits into a probability distribution.
///
/// The maximum logit is subtracted first so large scores do not overflow.
pub(crate) fn softmax(logits: &[f32]) -> Result<Vec<f32>, ClassifierError> {
    if logits.is_empty() {
        return Err(ClassifierError::Postprocess("Model returned no scores".into()));
    }
    if let Some(pos) = logits.iter().position(|v| !v.is_finite()) {
        return Err(ClassifierError::Postprocess(format!(
            "Score {} is not a finite number ({})",
            pos, logits[pos]
        )));
    }

    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    Ok(exps.into_iter().map(|v| v / sum).collect())
}

/// Index of the largest value; the first one wins on ties.
pub(crate) fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, current)) if v <= current => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Rounds a probability to 4 decimal places.
pub(crate) fn round_confidence(probability: f32) -> f64 {
    (f64::from(probability) * 10_000.0).round() / 10_000.0
}
