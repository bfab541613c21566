//! Order diagnostics for sorted output.

/// `true` if no adjacent pair is strictly out of order.
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| !(w[0] > w[1]))
}

/// Number of index pairs `(i, j)` with `i < j` and `data[i] > data[j]`.
///
/// Merge-based, `O(n log n)`. Assumes a total order; the count is not
/// meaningful for data containing unordered values such as `NaN`.
pub fn count_inversions<T: PartialOrd + Copy>(data: &[T]) -> u64 {
    let mut work = data.to_vec();
    let mut scratch = Vec::with_capacity(data.len());
    merge_count(&mut work, &mut scratch)
}

fn merge_count<T: PartialOrd + Copy>(data: &mut [T], scratch: &mut Vec<T>) -> u64 {
    let n = data.len();
    if n < 2 {
        return 0;
    }
    let mid = n / 2;
    let mut count = merge_count(&mut data[..mid], scratch) + merge_count(&mut data[mid..], scratch);

    scratch.clear();
    let (mut i, mut j) = (0, mid);
    while i < mid && j < n {
        if data[i] > data[j] {
            // Every remaining left element is at least data[i].
            count += (mid - i) as u64;
            scratch.push(data[j]);
            j += 1;
        } else {
            scratch.push(data[i]);
            i += 1;
        }
    }
    scratch.extend_from_slice(&data[i..mid]);
    scratch.extend_from_slice(&data[j..n]);
    data.copy_from_slice(&scratch[..]);
    count
}
