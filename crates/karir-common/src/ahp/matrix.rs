use std::collections::HashMap;

use super::AhpError;

/// Stored pairwise judgments keyed by (criterion a, criterion b). Only one
/// orientation of each pair needs to be present.
pub type JudgmentMap = HashMap<(i64, i64), f64>;

/// Rebuild the dense n x n comparison matrix from the stored judgment half.
///
/// Rows and columns follow the order of `criterion_ids`. The diagonal is
/// fixed at 1. Off the diagonal, a directly stored judgment wins over the
/// reciprocal of its mirrored entry. A pair with neither orientation stored
/// fails with `IncompleteMatrix`; it is never defaulted to 1.
pub fn build_comparison_matrix(
    criterion_ids: &[i64],
    judgments: &JudgmentMap,
) -> Result<Vec<Vec<f64>>, AhpError> {
    let mut matrix = Vec::with_capacity(criterion_ids.len());

    for &row_id in criterion_ids {
        let mut row = Vec::with_capacity(criterion_ids.len());
        for &col_id in criterion_ids {
            let cell = if row_id == col_id {
                1.0
            } else if let Some(value) = judgments.get(&(row_id, col_id)) {
                *value
            } else if let Some(value) = judgments.get(&(col_id, row_id)) {
                1.0 / value
            } else {
                return Err(AhpError::IncompleteMatrix {
                    a: row_id,
                    b: col_id,
                });
            };
            row.push(cell);
        }
        matrix.push(row);
    }

    Ok(matrix)
}
