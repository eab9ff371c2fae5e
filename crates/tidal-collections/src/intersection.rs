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

//! The result of an intersection whose shape depends on the operands.

/// Outcome of intersecting two collections.
///
/// Two discrete spans may overlap in a single value, in which case the
/// intersection is that value rather than a one-element span.
#[derive(Debug, Clone, PartialEq)]
pub enum Intersection<T, C> {
    Empty,
    Scalar(T),
    Collection(C),
}

impl<T, C> Intersection<T, C> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Intersection::Empty)
    }

    /// Returns the collection, if the intersection is one.
    #[inline]
    pub fn collection(self) -> Option<C> {
        match self {
            Intersection::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the single value, if the intersection is one.
    #[inline]
    pub fn scalar(self) -> Option<T> {
        match self {
            Intersection::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Maps both non-empty shapes into one type.
    pub fn map_into<R>(self, scalar: impl FnOnce(T) -> R, collection: impl FnOnce(C) -> R) -> Option<R> {
        match self {
            Intersection::Empty => None,
            Intersection::Scalar(v) => Some(scalar(v)),
            Intersection::Collection(c) => Some(collection(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let e: Intersection<i32, Vec<i32>> = Intersection::Empty;
        assert!(e.is_empty());
        assert_eq!(Intersection::<i32, Vec<i32>>::Scalar(3).scalar(), Some(3));
        assert_eq!(Intersection::<i32, Vec<i32>>::Scalar(3).collection(), None);
        let c: Intersection<i32, Vec<i32>> = Intersection::Collection(vec![1, 2]);
        assert_eq!(c.map_into(|v| vec![v], |c| c), Some(vec![1, 2]));
    }
}
