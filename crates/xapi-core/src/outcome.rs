//! Outcomes — the statement `result` field.

use crate::extensions::Extensions;

/// The measured outcome of an experience: score, success, completion,
/// a free-form response, and how long it took.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
  pub score:      Option<Score>,
  pub success:    Option<bool>,
  pub completion: Option<bool>,
  pub response:   Option<String>,
  /// ISO 8601 duration text, passed through opaquely.
  pub duration:   Option<String>,
  pub extensions: Option<Extensions>,
}

/// A score range. `scaled` is -1.0..=1.0 by convention; the model does not
/// enforce the range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Score {
  pub scaled: Option<f64>,
  pub raw:    Option<f64>,
  pub min:    Option<f64>,
  pub max:    Option<f64>,
}
