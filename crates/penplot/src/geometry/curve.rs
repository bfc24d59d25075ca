use super::{coincident, OutputSegment};
use kurbo::{CubicBez, ParamCurve, Point, QuadBez};
use std::num::NonZeroU32;

/// Sample a curve at `steps` equal parameter increments over `[0, 1]`.
///
/// The start point (t = 0) is never emitted, and neither is any sample that
/// coincides with the previously emitted point.
fn sample<C: ParamCurve>(curve: &C, start: Point, steps: NonZeroU32) -> Vec<Point> {
    let steps = steps.get();
    let mut points = Vec::with_capacity(steps as usize);
    let mut last = start;

    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        let p = curve.eval(t);
        if !coincident(p, last) {
            points.push(p);
            last = p;
        }
    }

    points
}

/// Flatten a quadratic Bézier from `start` through `ctrl` to `end`.
pub fn flatten_quad(start: Point, ctrl: Point, end: Point, steps: NonZeroU32) -> Vec<Point> {
    sample(&QuadBez::new(start, ctrl, end), start, steps)
}

/// Flatten a cubic Bézier from `start` with controls `c1`, `c2` to `end`.
pub fn flatten_cubic(
    start: Point,
    c1: Point,
    c2: Point,
    end: Point,
    steps: NonZeroU32,
) -> Vec<Point> {
    sample(&CubicBez::new(start, c1, c2, end), start, steps)
}

/// Flatten any output-space segment into the points a pen-down motion visits.
///
/// Lines yield their end point unless it coincides with `start`; moves and
/// closes yield nothing.
pub fn flatten(segment: &OutputSegment, start: Point, steps: NonZeroU32) -> Vec<Point> {
    match *segment {
        OutputSegment::LineTo(p) => {
            if coincident(p, start) {
                Vec::new()
            } else {
                vec![p]
            }
        }
        OutputSegment::QuadTo(ctrl, end) => flatten_quad(start, ctrl, end, steps),
        OutputSegment::CubicTo(c1, c2, end) => flatten_cubic(start, c1, c2, end, steps),
        OutputSegment::MoveTo(_) | OutputSegment::ClosePath => Vec::new(),
    }
}
