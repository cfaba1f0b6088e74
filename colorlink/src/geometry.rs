// geometry.rs - Pixel-space geometry kernel for tile placement and path checks
// Pure functions only; identical float inputs give identical answers.

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Board-local pixel coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Straight line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Zero-length segment sitting on a single point
    #[inline]
    pub const fn degenerate(point: Point) -> Self {
        Self::new(point, point)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Axis-aligned rectangle, y grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle of `width x height` centered on `center`
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        let half_w = width * 0.5;
        let half_h = height * 0.5;
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(self, margin: f32) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let value = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if value == 0.0 {
        Orientation::Collinear
    } else if value > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` lies inside the bounding box of `p..r` (collinear case only)
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// True for proper crossings and for an endpoint lying exactly on the other
/// segment, so segments sharing an endpoint intersect.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> bool {
    let (p1, q1) = (s1.start, s1.end);
    let (p2, q2) = (s2.start, s2.end);

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Euclidean distance from `point` to the closest point of `segment`
pub fn point_to_segment_distance(point: Point, segment: &Segment) -> f32 {
    let ab = segment.end - segment.start;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f32::EPSILON {
        return point.distance(segment.start);
    }
    let ap = point - segment.start;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    point.distance(segment.start.lerp(segment.end, t))
}

/// Strict overlap: rectangles that only share an edge do not overlap
#[inline]
pub fn rectangles_overlap(r1: &Rect, r2: &Rect) -> bool {
    r1.left < r2.right && r1.right > r2.left && r1.top < r2.bottom && r1.bottom > r2.top
}

// ============================================================================
// POLYLINES
// ============================================================================

/// Consecutive segments of an open polyline
pub fn polyline_segments(points: &[Point]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|pair| Segment::new(pair[0], pair[1]))
        .collect()
}

pub fn polyline_length(points: &[Point]) -> f32 {
    points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
}

/// Point at arc length `distance` from the polyline start
fn point_at_length(points: &[Point], distance: f32) -> Point {
    let mut remaining = distance.max(0.0);
    for pair in points.windows(2) {
        let step = pair[0].distance(pair[1]);
        if remaining <= step {
            if step <= f32::EPSILON {
                return pair[0];
            }
            return pair[0].lerp(pair[1], remaining / step);
        }
        remaining -= step;
    }
    points.last().copied().unwrap_or_default()
}

/// Approximate a polyline by `count` chords of equal arc length.
///
/// The chords span the whole polyline, first chord starting on the first
/// point and last chord ending on the last point. An empty input or a zero
/// count yields no chords.
pub fn resample_chords(points: &[Point], count: usize) -> Vec<Segment> {
    if points.is_empty() || count == 0 {
        return Vec::new();
    }
    let total = polyline_length(points);
    let mut stations = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let station = if i == count {
            points[points.len() - 1]
        } else {
            point_at_length(points, total * i as f32 / count as f32)
        };
        stations.push(station);
    }
    polyline_segments(&stations)
}

/// Whether any segment of `a` intersects any segment of `b`
pub fn chains_intersect(a: &[Segment], b: &[Segment]) -> bool {
    a.iter()
        .any(|lhs| b.iter().any(|rhs| segments_intersect(lhs, rhs)))
}
