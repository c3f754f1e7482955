//! Visibility computation around an observer.
//!
//! Builds the visual volume: for every direction around the observer, the
//! wall segment that is struck first. The circle is split at every segment
//! end-point angle. Inside one such angular interval no end point appears,
//! so the set of segments crossing the ray and their depth order are
//! constant, and one probe ray at the interval midpoint decides the nearest
//! segment for the whole interval. Adjacent intervals owned by the same
//! segment are merged into a single [`Edge`].
//!
//! # Edge cases
//!
//! - Segments seen edge-on (collinear with the observer) subtend no angle and
//!   are ignored.
//! - An observer standing exactly on a vertex or a wall gets whatever the
//!   probe rays report; the result is implementation-defined.
//! - Directions with no wall at all (observer outside the boundary) produce
//!   no edge, leaving those rays unset downstream.

use super::{Edge, Environment, Segment};
use crate::core::Point2D;
use crate::core::math::{ccw_span, normalize_angle};
use std::f64::consts::PI;

/// Intervals narrower than this are treated as a single critical angle.
const ANGLE_EPSILON: f64 = 1e-12;

/// Relative cross-product threshold for segments seen edge-on.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// Angular footprint of one wall segment.
#[derive(Debug, Clone, Copy)]
struct Span {
    segment: Segment,
    start: f64,
    width: f64,
}

impl Span {
    /// Orient the segment counter-clockwise around the observer.
    fn from_segment(segment: Segment, observer: Point2D) -> Option<Self> {
        let a = segment.start - observer;
        let b = segment.end - observer;
        let cross = a.cross(b);
        if cross.abs() <= COLLINEAR_EPSILON * a.norm() * b.norm() {
            return None;
        }

        let (from, to) = if cross > 0.0 { (a, b) } else { (b, a) };
        let start = from.y.atan2(from.x);
        let end = to.y.atan2(to.x);
        Some(Self {
            segment,
            start,
            width: ccw_span(start, end),
        })
    }

    #[inline]
    fn covers(&self, angle: f64) -> bool {
        ccw_span(self.start, angle) < self.width
    }
}

/// Contiguous angular run owned by one segment.
#[derive(Debug, Clone, Copy)]
struct Run {
    owner: usize,
    lo: f64,
    hi: f64,
}

/// The set of visible edges around an observer.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualVolume {
    observer: Point2D,
    edges: Vec<Edge>,
}

impl VisualVolume {
    /// Compute the visual volume of `observer` inside `environment`.
    ///
    /// Edges are ordered by angle, starting at -π. The result depends only
    /// on the arguments.
    pub fn compute(environment: &Environment, observer: Point2D) -> Self {
        let spans: Vec<Span> = environment
            .segments()
            .filter_map(|s| Span::from_segment(s, observer))
            .collect();

        let mut critical = Vec::with_capacity(2 * spans.len() + 2);
        critical.push(-PI);
        for span in &spans {
            critical.push(span.start);
            critical.push(normalize_angle(span.start + span.width));
        }
        critical.push(PI);
        critical.sort_by(f64::total_cmp);
        critical.dedup_by(|b, a| (*b - *a).abs() < ANGLE_EPSILON);

        let mut runs: Vec<Run> = Vec::new();
        let mut current: Option<Run> = None;

        for w in critical.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            if hi - lo < ANGLE_EPSILON {
                continue;
            }

            let owner = nearest_span(&spans, observer, 0.5 * (lo + hi));
            match (&mut current, owner) {
                (Some(run), Some(owner)) if run.owner == owner => run.hi = hi,
                (slot, owner) => {
                    if let Some(run) = slot.take() {
                        runs.push(run);
                    }
                    *slot = owner.map(|owner| Run { owner, lo, hi });
                }
            }
        }
        if let Some(run) = current {
            runs.push(run);
        }

        // Join the runs on either side of the ±π seam.
        if runs.len() > 1 {
            let first = runs[0];
            let last = runs[runs.len() - 1];
            if first.owner == last.owner
                && (first.lo + PI).abs() < ANGLE_EPSILON
                && (last.hi - PI).abs() < ANGLE_EPSILON
            {
                runs.remove(0);
                if let Some(last) = runs.last_mut() {
                    last.hi = first.hi;
                }
            }
        }

        let edges = runs
            .into_iter()
            .map(|run| Edge::new(spans[run.owner].segment, run.lo, run.hi))
            .collect();

        Self { observer, edges }
    }

    /// Observer the volume was computed for.
    pub fn observer(&self) -> Point2D {
        self.observer
    }

    /// Visible edges, ordered by angle.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consume the volume, returning its edges.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Distance to the nearest wall along `angle`, if any wall is visible there.
    pub fn range_at(&self, angle: f64) -> Option<f64> {
        self.edges
            .iter()
            .find(|e| e.contains_angle(angle))
            .and_then(|e| e.range_at(self.observer, angle))
    }
}

/// Index of the span whose segment the ray at `angle` strikes first.
fn nearest_span(spans: &[Span], observer: Point2D, angle: f64) -> Option<usize> {
    let direction = Point2D::from_angle(angle);
    spans
        .iter()
        .enumerate()
        .filter(|(_, span)| span.covers(angle))
        .filter_map(|(i, span)| {
            span.segment
                .line_intersection(observer, direction)
                .filter(|t| *t > 0.0)
                .map(|t| (i, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}
