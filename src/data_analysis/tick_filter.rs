// src/data_analysis/tick_filter.rs

/// Thin an ordered list of candidate tick positions.
///
/// Keeps each element whose gap to the *next* element is at least
/// `min_interval`, and always keeps the final element. The result is a
/// subsequence of the input. Empty input yields empty output; a single
/// element is kept as-is.
pub fn interval_filter(positions: &[f64], min_interval: f64) -> Vec<f64> {
    let mut filtered = Vec::with_capacity(positions.len());

    for pair in positions.windows(2) {
        if pair[1] - pair[0] >= min_interval {
            filtered.push(pair[0]);
        }
    }
    // Include the last element
    if let Some(&last) = positions.last() {
        filtered.push(last);
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_elements_with_wide_forward_gap_plus_last() {
        // gaps: 100, 150, 10, 140
        let positions = vec![0.0, 100.0, 250.0, 260.0, 400.0];
        assert_eq!(interval_filter(&positions, 150.0), vec![100.0, 400.0]);
    }

    #[test]
    fn dense_candidates_collapse_to_last() {
        let positions = vec![0.0, 10.0, 20.0, 30.0];
        assert_eq!(interval_filter(&positions, 100.0), vec![30.0]);
    }

    #[test]
    fn sparse_candidates_all_survive() {
        let positions = vec![0.0, 600.0, 1200.0, 1800.0];
        assert_eq!(
            interval_filter(&positions, 580.0),
            vec![0.0, 600.0, 1200.0, 1800.0]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(interval_filter(&[], 100.0).is_empty());
    }

    #[test]
    fn single_element_is_kept() {
        assert_eq!(interval_filter(&[42.0], 100.0), vec![42.0]);
    }
}

// src/data_analysis/tick_filter.rs
