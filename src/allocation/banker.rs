use std::fmt::Display;

use crate::dsa::bitset::BitSet;
use crate::linear_algebra::matrix::{AsMutVector, AsVector, Matrix, MatrixError, Result};

// outcome over row indices
#[derive(Clone,Debug,PartialEq,Eq)]
pub enum Safety {
    Safe(Vec<usize>),
    // rows that could finish before the search got stuck
    Unsafe{finished:Vec<usize>}
}

impl Safety {
    pub fn is_safe(&self) -> bool {
        matches!(self,Safety::Safe(_))
    }
}

// outcome over process names
#[derive(Clone,Debug,PartialEq,Eq)]
pub enum SafetyReport {
    Safe(Vec<String>),
    Unsafe{finished:Vec<String>}
}

impl SafetyReport {
    pub fn is_safe(&self) -> bool {
        matches!(self,SafetyReport::Safe(_))
    }
}

impl Display for SafetyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyReport::Safe(sequence) => write!(f,"System is in safe state.\nSequence: {}",sequence.join(" → ")),
            SafetyReport::Unsafe{..} => write!(f,"System is in unsafe state!\nRequest may lead to deadlock."),
        }
    }
}

/// Banker's safety algorithm.
///
/// Repeatedly scans the unfinished rows in index order and finishes the first one
/// whose `need` row fits in the work vector, releasing its `allocation` row. The
/// lowest eligible index always wins, so the sequence is deterministic.
pub fn find_safe_sequence(allocation:&Matrix,need:&Matrix,available:&[i64]) -> Result<Safety> {
    if allocation.dimension() != need.dimension() {
        return Err(MatrixError::DimensionMismatch {
            matrix_size1: allocation.dimension(),
            matrix_size2: need.dimension() })
    }
    if need.col_count() != available.len() {
        return Err(MatrixError::VectorLenUnmatch { len1: need.col_count(), len2: available.len() })
    }

    let p_len = need.row_count();
    let mut work = available.to_vec();
    let mut finish = BitSet::filled(p_len, false);
    let mut sequence = Vec::with_capacity(p_len);

    while !finish.all() {
        let mut found = None;
        for i in 0..p_len {
            if finish.get_at(i) == Some(true) {
                continue;
            }
            if need.row(i)?.try_le(&work)? {
                found = Some(i);
                break;
            }
        }
        let Some(i) = found
            else {break};
        work.try_add_assign(allocation.row(i)?)?;
        finish.store_at(i, true);
        sequence.push(i);
    }

    debug_assert_eq!(finish.len(),p_len);
    debug_assert_eq!(finish.count_ones(),sequence.len());
    if sequence.len() == p_len {
        Ok(Safety::Safe(sequence))
    } else {
        Ok(Safety::Unsafe{finished:sequence})
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_single_process_fits() {
        let allocation = Matrix::zeros(1, 1);
        let need = Matrix::filled(1, 1, 1);
        assert_eq!(find_safe_sequence(&allocation, &need, &[1]).unwrap(),Safety::Safe(vec![0]));
    }

    #[test]
    fn test_nobody_fits() {
        let allocation = Matrix::zeros(2, 1);
        let need = Matrix::filled(2, 1, 2);
        let safety = find_safe_sequence(&allocation, &need, &[1]).unwrap();
        assert!(!safety.is_safe());
        assert_eq!(safety,Safety::Unsafe{finished:vec![]});
    }

    #[test]
    fn test_release_unblocks_later_rows() {
        // textbook five process, three resource instance
        let allocation = Matrix::from_rows(&[[0i64,1,0],[2,0,0],[3,0,2],[2,1,1],[0,0,2]]).unwrap();
        let need = Matrix::from_rows(&[[7i64,4,3],[1,2,2],[6,0,0],[0,1,1],[4,3,1]]).unwrap();
        let safety = find_safe_sequence(&allocation, &need, &[3,3,2]).unwrap();
        assert_eq!(safety,Safety::Safe(vec![1,3,0,2,4]));
    }

    #[test]
    fn test_partial_progress_is_unsafe() {
        let allocation = Matrix::from_rows(&[[1i64],[0],[0]]).unwrap();
        let need = Matrix::from_rows(&[[0i64],[5],[5]]).unwrap();
        let safety = find_safe_sequence(&allocation, &need, &[0]).unwrap();
        assert_eq!(safety,Safety::Unsafe{finished:vec![0]});
    }

    #[test]
    fn test_negative_need_always_fits() {
        let allocation = Matrix::from_rows(&[[1i64]]).unwrap();
        let need = Matrix::from_rows(&[[-1i64]]).unwrap();
        assert!(find_safe_sequence(&allocation, &need, &[-1]).unwrap().is_safe());
    }

    #[test]
    fn test_empty_state_is_safe() {
        assert_eq!(find_safe_sequence(&Matrix::new(), &Matrix::new(), &[]).unwrap(),Safety::Safe(vec![]));
    }

    #[test]
    fn test_dimension_checks() {
        let allocation = Matrix::zeros(2, 2);
        assert!(matches!(find_safe_sequence(&allocation, &Matrix::zeros(2, 3), &[0,0,0]),Err(MatrixError::DimensionMismatch{..})));
        assert!(matches!(find_safe_sequence(&allocation, &Matrix::zeros(2, 2), &[0]),Err(MatrixError::VectorLenUnmatch{..})));
    }

    #[test]
    fn test_zero_need_finishes_in_index_order() {
        let mut rng = rand::rng();
        let p_len = rng.random_range(1..50);
        let r_len = rng.random_range(1..10);
        let elements:Vec<i64> = (0..p_len*r_len).map(|_| rng.random_range(0..2)).collect();
        let allocation = Matrix::new_with_vec(elements, p_len, r_len).unwrap();
        let need = Matrix::zeros(p_len, r_len);
        let available = vec![0;r_len];
        let safety = find_safe_sequence(&allocation, &need, &available).unwrap();
        assert_eq!(safety,Safety::Safe((0..p_len).collect()));
    }

    #[test]
    fn test_report_text() {
        let safe = SafetyReport::Safe(vec!["P1".into(),"P2".into()]);
        assert_eq!(safe.to_string(),"System is in safe state.\nSequence: P1 → P2");
        let unsafe_report = SafetyReport::Unsafe{finished:vec![]};
        assert!(!unsafe_report.is_safe());
        assert!(unsafe_report.to_string().starts_with("System is in unsafe state!"));
    }
}
