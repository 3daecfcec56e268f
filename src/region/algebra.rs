//! Merge walks over sorted span lists.
//!
//! Every function takes span lists that are sorted by start and pairwise
//! disjoint (adjacent spans are allowed) and returns a list with the same
//! property. Results are merged: overlapping or adjacent output spans are
//! joined.

use super::Span;
use crate::space::Space;

/// Returns true if `spans` is sorted by start and no two spans overlap.
pub(crate) fn is_canonical<S: Space>(spans: &[Span<S>]) -> bool {
    spans.windows(2).all(|w| {
        let (prev, curr) = (&w[0], &w[1]);
        prev.space.compare_coords(&prev.end, &curr.start).is_lt()
    })
}

/// Returns true if `next` starts no later than one step after `last` ends.
fn touches<S: Space>(last: &Span<S>, next: &Span<S>) -> bool {
    let space = &last.space;
    if space.compare_coords(&next.start, &last.end).is_le() {
        return true;
    }
    space
        .offset(&last.end, 1)
        .is_some_and(|after| space.compare_coords(&after, &next.start).is_eq())
}

/// Appends `span` to `result`, joining it with the last span when they
/// overlap or touch.
fn merge_into<S: Space>(result: &mut Vec<Span<S>>, span: Span<S>) {
    if let Some(last) = result.last_mut() {
        if touches(last, &span) {
            if last.space.compare_coords(&span.end, &last.end).is_gt() {
                last.set_end(span.end);
            }
            return;
        }
    }
    result.push(span);
}

/// Merges overlapping and adjacent spans of a canonical list.
pub(crate) fn normalize<S: Space>(spans: &[Span<S>]) -> Vec<Span<S>> {
    let mut result = Vec::with_capacity(spans.len());
    for span in spans {
        merge_into(&mut result, span.clone());
    }
    result
}

pub(crate) fn compute_union<S: Space>(a: &[Span<S>], b: &[Span<S>]) -> Vec<Span<S>> {
    debug_assert!(is_canonical(a));
    debug_assert!(is_canonical(b));
    let mut result: Vec<Span<S>> = Vec::with_capacity(a.len() + b.len());
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        let (sa, sb) = (&a[i], &b[j]);
        if sa.space.compare_coords(&sa.start, &sb.start).is_le() {
            merge_into(&mut result, sa.clone());
            i += 1;
        } else {
            merge_into(&mut result, sb.clone());
            j += 1;
        }
    }
    for span in &a[i..] {
        merge_into(&mut result, span.clone());
    }
    for span in &b[j..] {
        merge_into(&mut result, span.clone());
    }

    result
}

pub(crate) fn compute_intersection<S: Space>(a: &[Span<S>], b: &[Span<S>]) -> Vec<Span<S>> {
    debug_assert!(is_canonical(a));
    debug_assert!(is_canonical(b));
    let mut result = Vec::new();
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        let (sa, sb) = (&a[i], &b[j]);
        let space = &sa.space;
        let start = if space.compare_coords(&sa.start, &sb.start).is_ge() {
            sa.start
        } else {
            sb.start
        };
        let end = if space.compare_coords(&sa.end, &sb.end).is_le() {
            sa.end
        } else {
            sb.end
        };
        if space.compare_coords(&start, &end).is_le() {
            merge_into(&mut result, Span::new(space.clone(), start, end));
        }
        if space.compare_coords(&sa.end, &sb.end).is_lt() {
            i += 1;
        } else {
            j += 1;
        }
    }

    result
}

/// Members of `a` that are not members of `b`.
pub(crate) fn compute_subtract<S: Space>(a: &[Span<S>], b: &[Span<S>]) -> Vec<Span<S>> {
    debug_assert!(is_canonical(a));
    debug_assert!(is_canonical(b));
    let mut result = Vec::new();
    let mut j = 0usize;

    for span in a {
        let space = &span.space;
        while j < b.len() && space.compare_coords(&b[j].end, &span.start).is_lt() {
            j += 1;
        }

        // `cursor` is the first member of `span` not yet emitted or cut.
        let mut cursor = Some(span.start);
        let mut k = j;
        while let (Some(from), Some(cut)) = (cursor, b.get(k)) {
            if space.compare_coords(&span.end, &cut.start).is_lt() {
                break;
            }
            if space.compare_coords(&from, &cut.start).is_lt() {
                if let Some(before) = space.offset(&cut.start, -1) {
                    merge_into(&mut result, Span::new(space.clone(), from, before));
                }
            }
            cursor = space.offset(&cut.end, 1);
            k += 1;
        }

        if let Some(from) = cursor {
            if space.compare_coords(&from, &span.end).is_le() {
                merge_into(&mut result, Span::new(space.clone(), from, span.end));
            }
        }
    }

    result
}

/// Set equality of two span lists.
pub(crate) fn same_members<S: Space>(
    left_space: &S,
    right_space: &S,
    left: &[Span<S>],
    right: &[Span<S>],
) -> bool {
    if !left_space.same_space(right_space) {
        return false;
    }
    let (left, right) = (normalize(left), normalize(right));
    left.len() == right.len()
        && left.iter().zip(&right).all(|(l, r)| {
            left_space.compare_coords(&l.start, &r.start).is_eq()
                && left_space.compare_coords(&l.end, &r.end).is_eq()
        })
}
