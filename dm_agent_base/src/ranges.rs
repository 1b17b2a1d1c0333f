//! Contiguous-range formatting for ascending integer sequences.

/// Render a strictly ascending integer sequence as comma-separated
/// contiguous runs: `[1,2,3,5,6,9]` becomes `"1-3,5-6,9"`.
///
/// A run only closes (emitting its last element) when the sequence breaks
/// or ends. Callers with a possibly-empty sequence must guard and report
/// an explicit "unsupported" outcome instead of calling this.
///
/// # Panics
///
/// Panics if `seq` is empty.
pub fn contiguous_ranges(seq: &[u32]) -> String {
    let mut in_range = false;
    let mut prev = seq[0];
    let mut output = seq[0].to_string();

    for &item in &seq[1..] {
        if item == prev + 1 {
            if !in_range {
                in_range = true;
                output.push('-');
            }
        } else {
            if in_range {
                output.push_str(&prev.to_string());
                in_range = false;
            }
            output.push(',');
            output.push_str(&item.to_string());
        }
        prev = item;
    }

    if in_range {
        output.push_str(&prev.to_string());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expand a formatted range string back into its integers.
    fn expand(ranges: &str) -> Vec<u32> {
        let mut out = Vec::new();
        for piece in ranges.split(',') {
            match piece.split_once('-') {
                Some((first, last)) => {
                    let first: u32 = first.parse().unwrap();
                    let last: u32 = last.parse().unwrap();
                    out.extend(first..=last);
                }
                None => out.push(piece.parse().unwrap()),
            }
        }
        out
    }

    #[test]
    fn test_single_run() {
        assert_eq!(contiguous_ranges(&[1, 2, 3, 4, 5]), "1-5");
    }

    #[test]
    fn test_mixed_runs_and_singles() {
        assert_eq!(contiguous_ranges(&[1, 3, 4, 5, 7]), "1,3-5,7");
        assert_eq!(contiguous_ranges(&[1, 2, 3, 5, 6, 9]), "1-3,5-6,9");
    }

    #[test]
    fn test_lone_element() {
        assert_eq!(contiguous_ranges(&[42]), "42");
    }

    #[test]
    fn test_two_element_run_renders_as_range() {
        assert_eq!(contiguous_ranges(&[5, 6]), "5-6");
    }

    #[test]
    fn test_round_trip_reproduces_input() {
        let cases: &[&[u32]] = &[
            &[1, 2, 3, 4, 5],
            &[1, 3, 4, 5, 7],
            &[42],
            &[1, 2, 3, 5, 6, 9],
            &[1, 6, 11, 36, 40, 44, 48, 149, 153, 157, 161, 165],
        ];
        for seq in cases {
            assert_eq!(&expand(&contiguous_ranges(seq)), seq);
        }
    }
}
