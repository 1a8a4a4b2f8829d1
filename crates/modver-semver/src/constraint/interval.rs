//! Version intervals and the set algebra over them
//!
//! A [`VersionInterval`] is one contiguous range of versions. Disjoint sets are
//! represented as a `Vec<VersionInterval>` kept sorted and non-touching by
//! [`VersionInterval::or`] and [`VersionInterval::and_all`]. An empty set is an empty
//! collection, or `None` where a single interval is expected.
//!
//! Intervals with an opaque bound ("plain" intervals) are never ordered. An inclusive
//! opaque bound admits only its own version and an exclusive one admits every other
//! version, so a plain interval is either a single version or everything but one.
//! Opaque versions rank below every semantic bound. Collections keep their semantic
//! members first, in order, followed by the plain ones.
//!
//! Intersecting "everything but `v`" with an interval that still admits `v` and is not
//! [`VersionInterval::INFINITE`] has no single-interval result. The exclusion of `v` is
//! dropped in that case, so such a result may still contain `v`.

use std::cmp::Ordering;
use std::fmt;

use super::bound::{compare_max, compare_min, Bound};
use crate::version::Version;

/// A contiguous range of versions, closed or open on either side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionInterval {
    min: Option<Bound>,
    max: Option<Bound>,
}

impl VersionInterval {
    /// The interval containing every version
    pub const INFINITE: VersionInterval = VersionInterval {
        min: None,
        max: None,
    };

    /// Create an interval from optional bounds.
    ///
    /// Returns `None` if both bounds are present and do not describe an interval: a
    /// semantic minimum above the maximum, or an opaque bound paired with any other
    /// version than its own.
    pub fn new(min: Option<Bound>, max: Option<Bound>) -> Option<Self> {
        if let (Some(lo), Some(hi)) = (&min, &max) {
            let valid = if lo.is_semantic() && hi.is_semantic() {
                lo.compare_version(hi) != Ordering::Greater
            } else {
                lo.version() == hi.version()
            };

            if !valid {
                return None;
            }
        }

        Some(Self::from_bounds(min, max))
    }

    /// Create an interval from bounds already known to be in order.
    pub(crate) fn from_bounds(min: Option<Bound>, max: Option<Bound>) -> Self {
        debug_assert!(
            match (&min, &max) {
                (Some(lo), Some(hi)) if lo.is_semantic() && hi.is_semantic() => lo.compare_version(hi) != Ordering::Greater,
                (Some(lo), Some(hi)) => lo.version() == hi.version(),
                _ => true,
            },
            "bounds out of order: {min:?} {max:?}"
        );

        VersionInterval { min, max }
    }

    /// The interval containing exactly `version`
    pub fn point(version: impl Into<Version>) -> Self {
        let version = version.into();
        Self::from_bounds(Some(Bound::inclusive(version.clone())), Some(Bound::inclusive(version)))
    }

    pub fn min(&self) -> Option<&Version> {
        self.min.as_ref().map(Bound::version)
    }

    pub fn max(&self) -> Option<&Version> {
        self.max.as_ref().map(Bound::version)
    }

    pub fn min_bound(&self) -> Option<&Bound> {
        self.min.as_ref()
    }

    pub fn max_bound(&self) -> Option<&Bound> {
        self.max.as_ref()
    }

    /// Whether the lower bound is inclusive, `false` when unbounded
    pub fn is_min_inclusive(&self) -> bool {
        self.min.as_ref().is_some_and(Bound::is_inclusive)
    }

    /// Whether the upper bound is inclusive, `false` when unbounded
    pub fn is_max_inclusive(&self) -> bool {
        self.max.as_ref().is_some_and(Bound::is_inclusive)
    }

    /// True if every present bound is a semantic version
    pub fn is_semantic(&self) -> bool {
        self.min.as_ref().map_or(true, Bound::is_semantic) && self.max.as_ref().map_or(true, Bound::is_semantic)
    }

    pub fn is_infinite(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// The only version a plain interval closed on an opaque bound can contain
    pub fn pinned_version(&self) -> Option<&Version> {
        [&self.min, &self.max]
            .into_iter()
            .flatten()
            .find(|bound| !bound.is_semantic() && bound.is_inclusive())
            .map(Bound::version)
    }

    /// The opaque version left out by a plain half-line such as `(-∞,v)` or `(v,∞)`
    pub fn excluded_version(&self) -> Option<&Version> {
        match (&self.min, &self.max) {
            (Some(bound), None) | (None, Some(bound)) if !bound.is_semantic() && !bound.is_inclusive() => {
                Some(bound.version())
            }
            _ => None,
        }
    }

    /// Check whether `version` lies within this interval.
    pub fn contains(&self, version: &Version) -> bool {
        if let (Some(min), Some(max)) = (&self.min, &self.max) {
            if !min.is_semantic() || !max.is_semantic() {
                // closed on both sides, a plain interval holds at most its own version
                return min.is_inclusive() && max.is_inclusive() && min.version() == version;
            }
        }

        self.min.as_ref().map_or(true, |b| b.admits(version, true))
            && self.max.as_ref().map_or(true, |b| b.admits(version, false))
    }

    /// Intersection of two intervals, `None` if they share no version.
    pub fn and(&self, other: &VersionInterval) -> Option<VersionInterval> {
        if !self.is_semantic() || !other.is_semantic() {
            Self::and_plain(self, other)
        } else {
            Self::and_semantic(self, other)
        }
    }

    fn and_plain(a: &VersionInterval, b: &VersionInterval) -> Option<VersionInterval> {
        if let Some(v) = a.pinned_version().or_else(|| b.pinned_version()) {
            if !a.contains(v) || !b.contains(v) {
                return None;
            }

            return Some(match (a.pinned_version().is_some(), b.pinned_version().is_some()) {
                (true, false) => a.clone(),
                (false, true) => b.clone(),
                _ if a == b => a.clone(),
                _ => VersionInterval::point(v.clone()),
            });
        }

        match (a.excluded_version(), b.excluded_version()) {
            (Some(v), Some(w)) if v == w => Some(if a == b {
                a.clone()
            } else {
                VersionInterval::from_bounds(None, Some(Bound::exclusive(v.clone())))
            }),
            // everything but two versions
            (Some(_), Some(_)) => Some(VersionInterval::INFINITE),
            (Some(_), None) if b.is_semantic() => Some(if b.is_infinite() { a.clone() } else { b.clone() }),
            (None, Some(_)) if a.is_semantic() => Some(if a.is_infinite() { b.clone() } else { a.clone() }),
            // (v,v) and other plain intervals that hold nothing
            _ => None,
        }
    }

    fn and_semantic(a: &VersionInterval, b: &VersionInterval) -> Option<VersionInterval> {
        let min_cmp = compare_min(a.min.as_ref(), b.min.as_ref());
        let max_cmp = compare_max(a.max.as_ref(), b.max.as_ref());

        match (min_cmp, max_cmp) {
            (Ordering::Equal, Ordering::Equal) | (Ordering::Equal, Ordering::Less) => Some(a.clone()),
            (Ordering::Equal, Ordering::Greater) | (Ordering::Less, Ordering::Equal) => Some(b.clone()),
            (Ordering::Greater, Ordering::Equal) => Some(a.clone()),
            // one encloses the other
            (Ordering::Less, Ordering::Greater) => Some(b.clone()),
            (Ordering::Greater, Ordering::Less) => Some(a.clone()),
            // staggered, b..a or a..b
            (Ordering::Less, Ordering::Less) => Self::span(&b.min, &a.max),
            (Ordering::Greater, Ordering::Greater) => Self::span(&a.min, &b.max),
        }
    }

    fn span(min: &Option<Bound>, max: &Option<Bound>) -> Option<VersionInterval> {
        match (min, max) {
            (Some(lo), Some(hi)) if !hi.admits_lower(lo) => None,
            _ => Some(VersionInterval::from_bounds(min.clone(), max.clone())),
        }
    }

    /// Intersection of two disjoint interval sets.
    pub fn and_all(a: &[VersionInterval], b: &[VersionInterval]) -> Vec<VersionInterval> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }

        // (a0 || a1) && (b0 || b1) == a0 && b0 || a0 && b1 || a1 && b0 || a1 && b1
        let all_merged: Vec<VersionInterval> = a
            .iter()
            .flat_map(|interval_a| b.iter().filter_map(move |interval_b| interval_a.and(interval_b)))
            .collect();

        if all_merged.len() <= 1 {
            return all_merged;
        }

        let mut ret = Vec::with_capacity(all_merged.len());
        for interval in &all_merged {
            Self::merge(interval, &mut ret);
        }
        ret
    }

    /// Union of a disjoint interval set with one more interval.
    pub fn or(a: &[VersionInterval], b: &VersionInterval) -> Vec<VersionInterval> {
        let mut ret = Vec::with_capacity(a.len() + 1);
        for interval in a {
            Self::merge(interval, &mut ret);
        }
        Self::merge(b, &mut ret);
        ret
    }

    /// Union of two disjoint interval sets.
    pub fn or_all(a: &[VersionInterval], b: &[VersionInterval]) -> Vec<VersionInterval> {
        let mut ret = Vec::with_capacity(a.len() + b.len());
        for interval in a.iter().chain(b) {
            Self::merge(interval, &mut ret);
        }
        ret
    }

    fn merge(a: &VersionInterval, out: &mut Vec<VersionInterval>) {
        if out.is_empty() {
            out.push(a.clone());
            return;
        }

        if let [only] = out.as_slice() {
            if only.is_infinite() {
                return;
            }
        }

        if !a.is_semantic() {
            Self::merge_plain(a, out);
            return;
        }

        // a collection holding everything but v never has other members
        let covers_excluded = out.iter().find_map(VersionInterval::excluded_version).map(|v| a.contains(v));
        if let Some(covers_excluded) = covers_excluded {
            if covers_excluded {
                *out = vec![VersionInterval::INFINITE];
            }
            return;
        }

        let split = out.iter().position(|interval| !interval.is_semantic()).unwrap_or(out.len());
        let mut points = out.split_off(split);

        Self::merge_semantic(a, out);

        points.retain(|point| {
            point
                .pinned_version()
                .map_or(true, |v| !out.iter().any(|interval| interval.contains(v)))
        });
        out.extend(points);
    }

    fn merge_plain(a: &VersionInterval, out: &mut Vec<VersionInterval>) {
        if let Some(v) = a.excluded_version() {
            let covered = out.iter().any(|interval| interval.contains(v));
            *out = vec![if covered { VersionInterval::INFINITE } else { a.clone() }];
        } else if let Some(v) = a.pinned_version() {
            if !a.contains(v) || out.iter().any(|interval| interval.contains(v)) {
                return;
            }

            if out.iter().any(|interval| interval.excluded_version() == Some(v)) {
                *out = vec![VersionInterval::INFINITE];
            } else {
                out.push(a.clone());
            }
        }
    }

    fn merge_semantic(a: &VersionInterval, out: &mut Vec<VersionInterval>) {
        if a.is_infinite() {
            *out = vec![VersionInterval::INFINITE];
            return;
        }

        let mut a = a.clone();
        let mut i = 0;

        while i < out.len() {
            let c = out[i].clone();

            if a.min.is_none() {
                // ..a..]
                let Some(a_max) = a.max.clone() else {
                    *out = vec![VersionInterval::INFINITE];
                    return;
                };

                if c.max.is_none() {
                    // ..a..] [..c..
                    match &c.min {
                        Some(c_min) if separated(&a_max, c_min) => out.insert(i, a),
                        _ => *out = vec![VersionInterval::INFINITE],
                    }
                    return;
                }

                if compare_max(a.max.as_ref(), c.max.as_ref()) != Ordering::Less {
                    // a encompasses c
                    out.remove(i);
                    continue;
                }

                match &c.min {
                    // c encompasses a
                    None => {}
                    Some(c_min) if separated(&a_max, c_min) => out.insert(i, a),
                    // c extends a to the right
                    Some(_) => out[i] = VersionInterval::from_bounds(None, c.max.clone()),
                }
                return;
            }

            if c.max.is_none() {
                // [..c..
                if compare_min(a.min.as_ref(), c.min.as_ref()) != Ordering::Less {
                    // c encompasses a
                    return;
                }

                let before_c = match (&a.max, &c.min) {
                    (Some(a_max), Some(c_min)) => separated(a_max, c_min),
                    _ => false,
                };

                if a.max.is_none() {
                    // a encompasses c and everything after it
                    out.truncate(i);
                    out.push(a);
                } else if before_c {
                    out.insert(i, a);
                } else {
                    // a extends c to the left
                    out[i] = VersionInterval::from_bounds(a.min.clone(), None);
                }
                return;
            }

            let reaches_c = match (&a.min, &c.max) {
                (Some(a_min), Some(c_max)) => !separated(c_max, a_min),
                _ => true,
            };

            if reaches_c {
                let overlaps = match (&a.max, &c.min) {
                    (Some(a_max), Some(c_min)) => !separated(a_max, c_min),
                    _ => true,
                };

                if !overlaps {
                    // a lies entirely before c
                    out.insert(i, a);
                    return;
                }

                let cmp_min = compare_min(a.min.as_ref(), c.min.as_ref());
                let cmp_max = compare_max(a.max.as_ref(), c.max.as_ref());

                if cmp_max != Ordering::Greater {
                    if cmp_min == Ordering::Less {
                        out[i] = VersionInterval::from_bounds(a.min.clone(), c.max.clone());
                    }
                    return;
                }

                if cmp_min == Ordering::Greater {
                    a = VersionInterval::from_bounds(c.min.clone(), a.max.clone());
                }

                // c is absorbed into a, which may reach further members
                out.remove(i);
                continue;
            }

            i += 1;
        }

        out.push(a);
    }

    /// Complement of this interval: zero, one or two intervals.
    pub fn not(&self) -> Vec<VersionInterval> {
        match (&self.min, &self.max) {
            (None, None) => Vec::new(),
            (None, Some(max)) => vec![VersionInterval::from_bounds(Some(max.flipped()), None)],
            (Some(min), None) => vec![VersionInterval::from_bounds(None, Some(min.flipped()))],
            // (x,x) is empty
            (Some(min), Some(max)) if min.version() == max.version() && !min.is_inclusive() && !max.is_inclusive() => {
                vec![VersionInterval::INFINITE]
            }
            (Some(min), Some(max)) => vec![
                VersionInterval::from_bounds(None, Some(min.flipped())),
                VersionInterval::from_bounds(Some(max.flipped()), None),
            ],
        }
    }

    /// Complement of a disjoint interval set.
    pub fn not_all(intervals: &[VersionInterval]) -> Vec<VersionInterval> {
        match intervals {
            [] => vec![VersionInterval::INFINITE],
            [single] => single.not(),
            _ => {
                // !(i0 || i1 || i2) == !i0 && !i1 && !i2
                let mut ret: Option<Vec<VersionInterval>> = None;

                for interval in intervals {
                    let inverted = interval.not();
                    let next = match ret {
                        None => inverted,
                        Some(prev) => Self::and_all(&prev, &inverted),
                    };
                    let exhausted = next.is_empty();
                    ret = Some(next);

                    if exhausted {
                        break;
                    }
                }

                ret.unwrap_or_default()
            }
        }
    }
}

/// Whether `upper` ends strictly before `lower` starts, with no shared version.
fn separated(upper: &Bound, lower: &Bound) -> bool {
    match upper.compare_version(lower) {
        Ordering::Less => true,
        Ordering::Equal => !upper.is_inclusive() && !lower.is_inclusive(),
        Ordering::Greater => false,
    }
}

impl fmt::Display for VersionInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.min {
            None => f.write_str("(-∞,")?,
            Some(min) => write!(f, "{}{},", if min.is_inclusive() { '[' } else { '(' }, min.version())?,
        }

        match &self.max {
            None => f.write_str("∞)"),
            Some(max) => write!(f, "{}{}", max.version(), if max.is_inclusive() { ']' } else { ')' }),
        }
    }
}
