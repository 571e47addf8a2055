use super::ActivityError;

/// Upper clip applied to raw potencies before the log transform (nM).
pub const POTENCY_CLIP_NM: f64 = 100_000_000.0;

const NANOMOLAR_TO_MOLAR: f64 = 1e-9;

/// Clip a raw potency to [`POTENCY_CLIP_NM`].
///
/// Values below the clip pass through untouched, including non-positive ones;
/// the domain check belongs to [`normalize_potencies`].
pub fn clip_potency(value_nm: f64) -> f64 {
    if value_nm > POTENCY_CLIP_NM {
        POTENCY_CLIP_NM
    } else {
        value_nm
    }
}

/// Convert raw IC50 values (nM) into pIC50 scores.
///
/// Each value is clipped to 1e8 nM and transformed as `-log10(v * 1e-9)`.
/// The output has the same length and order as the input.
///
/// # Errors
///
/// Returns [`ActivityError::Domain`] for the first value that is zero,
/// negative or NaN. No partial output is produced.
pub fn normalize_potencies(values_nm: &[f64]) -> Result<Vec<f64>, ActivityError> {
    values_nm
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(ActivityError::Domain { index, value });
            }
            let molar = clip_potency(value) * NANOMOLAR_TO_MOLAR;
            Ok(-molar.log10())
        })
        .collect()
}
