// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Search helpers over sorted slices.
//!
//! Sets, span sets and sequences all keep their components sorted, so point
//! lookups are binary searches. These helpers express the searches once in
//! terms of a comparison closure.

use std::cmp::Ordering;

/// Checks whether `items` are strictly increasing under `cmp`.
#[inline(always)]
pub fn is_strictly_sorted_by<T, F>(items: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.windows(2).all(|w| cmp(&w[0], &w[1]) == Ordering::Less)
}

/// Returns the index of the first item for which `is_before` is `false`.
///
/// # Invariants
///
/// - `items` must be partitioned: every item for which `is_before` holds
///   precedes every item for which it does not.
#[inline(always)]
pub fn lower_bound_by<T, F>(items: &[T], mut is_before: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut lo: usize = 0;
    let mut hi: usize = items.len();

    while lo < hi {
        let mid = lo + ((hi - lo) >> 1);
        debug_assert!(
            mid < items.len(),
            "`lower_bound_by` computed mid index out of bounds"
        );
        // SAFETY: mid is always in bounds because lo < hi <= items.len(),
        // therefore mid < items.len()
        if is_before(unsafe { items.get_unchecked(mid) }) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Index of the item equal to `key` under `cmp`, if any.
#[inline]
pub fn find_by<T, K, F>(items: &[T], key: &K, mut cmp: F) -> Option<usize>
where
    F: FnMut(&T, &K) -> Ordering,
{
    let i = lower_bound_by(items, |item| cmp(item, key) == Ordering::Less);
    (i < items.len() && cmp(&items[i], key) == Ordering::Equal).then_some(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_strictly_sorted_by() {
        let empty: [i32; 0] = [];
        assert!(is_strictly_sorted_by(&empty, i32::cmp));
        assert!(is_strictly_sorted_by(&[1, 3, 7], i32::cmp));
        assert!(!is_strictly_sorted_by(&[1, 3, 3], i32::cmp));
        assert!(!is_strictly_sorted_by(&[3, 1], i32::cmp));
    }

    #[test]
    fn test_lower_bound_by_basic() {
        let v = [0, 5, 10];
        assert_eq!(lower_bound_by(&v, |x| *x < 0), 0);
        assert_eq!(lower_bound_by(&v, |x| *x < 4), 1);
        assert_eq!(lower_bound_by(&v, |x| *x < 5), 1);
        assert_eq!(lower_bound_by(&v, |x| *x < 6), 2);
        assert_eq!(lower_bound_by(&v, |x| *x < 21), 3);
    }

    #[test]
    fn test_find_by() {
        let v = [1, 4, 9, 16];
        assert_eq!(find_by(&v, &9, i32::cmp), Some(2));
        assert_eq!(find_by(&v, &5, i32::cmp), None);
        assert_eq!(find_by(&v, &20, i32::cmp), None);
    }
}
