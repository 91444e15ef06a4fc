//! Validation utilities

use crate::types::*;

/// Lowest accepted similarity threshold
pub const MIN_THRESHOLD: u8 = 50;

/// Highest accepted similarity threshold
pub const MAX_THRESHOLD: u8 = 100;

const SLIDER_EPSILON: f64 = 1e-9;

/// Validate that a similarity threshold is within 50..=100
pub fn validate_threshold(threshold: u8) -> PipelineResult<()> {
    if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
        return Err(PipelineError::Validation(format!(
            "Similarity threshold must be between {} and {}, got {}",
            MIN_THRESHOLD, MAX_THRESHOLD, threshold
        )));
    }
    Ok(())
}

/// Convert a 0.50..=1.00 slider position into a 50..=100 threshold
///
/// The position is truncated to a whole percentage, so 0.875 gives 87.
pub fn threshold_from_slider(position: f64) -> PipelineResult<u8> {
    if !position.is_finite() {
        return Err(PipelineError::Validation(
            "Slider position must be a finite number".to_string(),
        ));
    }

    let (min, max) = (
        f64::from(MIN_THRESHOLD) / 100.0,
        f64::from(MAX_THRESHOLD) / 100.0,
    );
    if position < min || position > max {
        return Err(PipelineError::Validation(format!(
            "Slider position must be between 0.50 and 1.00, got {}",
            position
        )));
    }

    // Epsilon keeps 0.57 * 100 = 56.99.. at 57
    let threshold = (position * 100.0 + SLIDER_EPSILON).floor();
    Ok(threshold.min(f64::from(MAX_THRESHOLD)) as u8)
}

/// Validate locator column boundaries: non-empty and strictly increasing
pub fn validate_column_boundaries(boundaries: &[u32]) -> PipelineResult<()> {
    if boundaries.is_empty() {
        return Err(PipelineError::Validation(
            "Column boundaries cannot be empty".to_string(),
        ));
    }

    if boundaries.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(PipelineError::Validation(format!(
            "Column boundaries must be strictly increasing: {:?}",
            boundaries
        )));
    }

    if boundaries.len() >= Column::CANONICAL.len() {
        return Err(PipelineError::Validation(format!(
            "At most {} column boundaries are supported, got {}",
            Column::CANONICAL.len() - 1,
            boundaries.len()
        )));
    }

    Ok(())
}
