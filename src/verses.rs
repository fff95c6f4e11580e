//! Compact verse-range notation: `[1, 2, 3, 5, 7, 8, 9]` <-> `"1-3+5+7-9"`.

/// Widest span a single `start-end` token may enumerate.
/// Keeps a hostile `1-4000000000` from allocating gigabytes.
const MAX_RANGE_SPAN: u32 = 10_000;

/// Render verse numbers in compact range notation.
///
/// Runs of consecutive numbers collapse to `start-end`, singles stay bare,
/// and groups are joined with `+`. Input order and duplicates do not matter.
pub fn compact(verses: &[u32]) -> String {
    let mut sorted = verses.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut groups: Vec<String> = Vec::new();
    let mut numbers = sorted.into_iter();
    let Some(first) = numbers.next() else {
        return String::new();
    };

    let mut start = first;
    let mut end = first;
    for number in numbers {
        if end.checked_add(1) == Some(number) {
            end = number;
            continue;
        }
        groups.push(render_run(start, end));
        start = number;
        end = number;
    }
    groups.push(render_run(start, end));

    return groups.join("+");
}

/// Parse compact range notation back into verse numbers.
///
/// Tokens are split on `+`. A token missing its end (`"4-"`) degrades to the
/// single start value, inverted ranges are swapped, and unparseable tokens
/// are skipped. The result is not deduplicated.
pub fn expand(text: &str) -> Vec<u32> {
    let mut result = Vec::new();

    for part in text.split('+') {
        if part.contains('-') {
            expand_range_token(part, &mut result);
        } else if let Ok(number) = part.trim().parse::<u32>() {
            result.push(number);
        }
    }

    return result;
}

/// Enumerate one `start-end` token into `out`.
fn expand_range_token(part: &str, out: &mut Vec<u32>) {
    let mut bounds = part.split('-').filter(|s| return !s.trim().is_empty());
    let Some(Ok(mut start)) = bounds.next().map(|s| return s.trim().parse::<u32>()) else {
        return;
    };
    let Some(Ok(mut end)) = bounds.next().map(|s| return s.trim().parse::<u32>()) else {
        out.push(start);
        return;
    };

    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    let end = end.min(start.saturating_add(MAX_RANGE_SPAN));
    out.extend(start..=end);
}

/// Render a single run as `n` or `start-end`.
fn render_run(start: u32, end: u32) -> String {
    if start == end {
        return start.to_string();
    }
    return format!("{start}-{end}");
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn compacts_runs_and_singles() {
        assert_eq!(compact(&[1, 2, 3, 5, 7, 8, 9]), "1-3+5+7-9");
    }

    #[test]
    fn compacts_unsorted_input_with_duplicates() {
        assert_eq!(compact(&[4, 2, 7, 1, 9, 10, 2]), "1-2+4+7+9-10");
    }

    #[test]
    fn compact_of_nothing_is_empty() {
        assert_eq!(compact(&[]), "");
    }

    #[test]
    fn expands_ranges_and_singles() {
        assert_eq!(expand("1-3+5"), vec![1, 2, 3, 5]);
    }

    #[test]
    fn dangling_separator_degrades_to_start() {
        assert_eq!(expand("4-"), vec![4]);
        assert_eq!(expand("1-3+"), vec![1, 2, 3]);
    }

    #[test]
    fn inverted_range_is_swapped() {
        assert_eq!(expand("5-3"), vec![3, 4, 5]);
    }

    #[test]
    fn garbage_tokens_are_skipped() {
        assert_eq!(expand("a+2+x-y"), vec![2]);
        assert!(expand("").is_empty());
    }

    #[test]
    fn huge_range_is_clamped() {
        assert_eq!(expand("1-4000000000").len(), 10_001);
    }

    proptest! {
        #[test]
        fn expand_inverts_compact(verses in proptest::collection::btree_set(1_u32..500, 1..40)) {
            let expected: Vec<u32> = verses.iter().copied().collect();
            let input: Vec<u32> = verses.into_iter().rev().collect();
            prop_assert_eq!(expand(&compact(&input)), expected);
        }
    }
}
