//! Annular sector generator for the gauge ring.
//!
//! Angles follow the dial convention: radians, zero at 12 o'clock, increasing
//! clockwise. Generated paths are centred on the origin with y pointing down.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::path::Path;
use crate::segments::{sum_till, TickData};

const EPSILON: f64 = 1e-12;

/// Resolved geometry of one ring segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Lazily evaluated generator for the segments of a gauge ring.
///
/// Nothing is computed until a segment is requested; every call is pure.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGenerator {
    tick_data: TickData,
    inner_radius: f64,
    outer_radius: f64,
    corner_radius: f64,
    pad_angle: f64,
    min_angle: f64,
    max_angle: f64,
}

impl ArcGenerator {
    /// Generator over `tick_data` sweeping `min_angle..max_angle` (degrees).
    pub fn new(tick_data: TickData, min_angle: f64, max_angle: f64) -> Self {
        Self {
            tick_data,
            inner_radius: 0.0,
            outer_radius: 0.0,
            corner_radius: 0.0,
            pad_angle: 0.0,
            min_angle,
            max_angle,
        }
    }

    pub fn inner_radius(mut self, radius: f64) -> Self {
        self.inner_radius = radius;
        self
    }

    pub fn outer_radius(mut self, radius: f64) -> Self {
        self.outer_radius = radius;
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Angular gap (radians) between adjacent segments.
    pub fn pad_angle(mut self, angle: f64) -> Self {
        self.pad_angle = angle;
        self
    }

    pub fn tick_data(&self) -> &[f64] {
        &self.tick_data
    }

    pub fn len(&self) -> usize {
        self.tick_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tick_data.is_empty()
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.inner_radius, self.outer_radius)
    }

    pub fn rounding(&self) -> (f64, f64) {
        (self.corner_radius, self.pad_angle)
    }

    fn angle_at(&self, ratio: f64) -> f64 {
        (self.min_angle + ratio * (self.max_angle - self.min_angle)).to_radians()
    }

    /// Geometry of segment `index`. Indices past the end collapse onto the
    /// final angle.
    pub fn segment(&self, index: usize) -> ArcSegment {
        ArcSegment {
            start_angle: self.angle_at(sum_till(&self.tick_data, index)),
            end_angle: self.angle_at(sum_till(&self.tick_data, index + 1)),
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = ArcSegment> + '_ {
        (0..self.len()).map(|index| self.segment(index))
    }

    /// Point midway through segment `index`, radially and angularly.
    pub fn centroid(&self, index: usize) -> (f64, f64) {
        let segment = self.segment(index);
        let r = (segment.inner_radius + segment.outer_radius) / 2.0;
        let a = (segment.start_angle + segment.end_angle) / 2.0 - FRAC_PI_2;
        (a.cos() * r, a.sin() * r)
    }

    /// Outline of segment `index`, with padding and rounded corners applied.
    pub fn path(&self, index: usize) -> Path {
        let segment = self.segment(index);
        let mut path = Path::new();
        sector(&mut path, &segment, self.corner_radius, self.pad_angle);
        path
    }

    pub fn paths(&self) -> Vec<Path> {
        (0..self.len()).map(|index| self.path(index)).collect()
    }
}

struct CornerTangent {
    cx: f64,
    cy: f64,
    x01: f64,
    y01: f64,
    x11: f64,
    y11: f64,
}

// Circle of radius `rc` tangent to the line (x0,y0)-(x1,y1) and to the circle
// of radius `r1` about the origin.
fn corner_tangents(x0: f64, y0: f64, x1: f64, y1: f64, r1: f64, rc: f64, cw: bool) -> CornerTangent {
    let x01 = x0 - x1;
    let y01 = y0 - y1;
    let lo = (if cw { rc } else { -rc }) / (x01 * x01 + y01 * y01).sqrt();
    let ox = lo * y01;
    let oy = -lo * x01;
    let x11 = x0 + ox;
    let y11 = y0 + oy;
    let x10 = x1 + ox;
    let y10 = y1 + oy;
    let x00 = (x11 + x10) / 2.0;
    let y00 = (y11 + y10) / 2.0;
    let dx = x10 - x11;
    let dy = y10 - y11;
    let d2 = dx * dx + dy * dy;
    let r = r1 - rc;
    let cross = x11 * y10 - x10 * y11;
    let d = (if dy < 0.0 { -1.0 } else { 1.0 }) * (r * r * d2 - cross * cross).max(0.0).sqrt();
    let mut cx = (cross * dy - dx * d) / d2;
    let mut cy = (-cross * dx - dy * d) / d2;
    let cx1 = (cross * dy + dx * d) / d2;
    let cy1 = (-cross * dx + dy * d) / d2;

    // Keep the intersection closer to the chord midpoint.
    let (dx0, dy0) = (cx - x00, cy - y00);
    let (dx1, dy1) = (cx1 - x00, cy1 - y00);
    if dx0 * dx0 + dy0 * dy0 > dx1 * dx1 + dy1 * dy1 {
        cx = cx1;
        cy = cy1;
    }

    CornerTangent {
        cx,
        cy,
        x01: -ox,
        y01: -oy,
        x11: cx * (r1 / r - 1.0),
        y11: cy * (r1 / r - 1.0),
    }
}

// Saturates instead of returning NaN, so very thin hubs still get an inner edge.
fn asin(x: f64) -> f64 {
    if x >= 1.0 {
        FRAC_PI_2
    } else if x <= -1.0 {
        -FRAC_PI_2
    } else {
        x.asin()
    }
}

fn intersect(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Option<(f64, f64)> {
    let x10 = x1 - x0;
    let y10 = y1 - y0;
    let x32 = x3 - x2;
    let y32 = y3 - y2;
    let denom = y32 * x10 - x32 * y10;
    if denom * denom < EPSILON {
        return None;
    }
    let t = (x32 * (y0 - y2) - y32 * (x0 - x2)) / denom;
    Some((x0 + t * x10, y0 + t * y10))
}

fn sector(path: &mut Path, segment: &ArcSegment, corner_radius: f64, pad_angle: f64) {
    let mut r0 = segment.inner_radius;
    let mut r1 = segment.outer_radius;
    let a0 = segment.start_angle - FRAC_PI_2;
    let a1 = segment.end_angle - FRAC_PI_2;
    let da = (a1 - a0).abs();
    let cw = a1 > a0;

    if r1 < r0 {
        std::mem::swap(&mut r0, &mut r1);
    }

    // Degenerate: a point.
    if !(r1 > EPSILON) {
        path.move_to(0.0, 0.0);
        path.close();
        return;
    }

    // Full circle or annulus.
    if da > TAU - EPSILON {
        path.move_to(r1 * a0.cos(), r1 * a0.sin());
        path.arc(0.0, 0.0, r1, a0, a1, !cw);
        if r0 > EPSILON {
            path.move_to(r0 * a1.cos(), r0 * a1.sin());
            path.arc(0.0, 0.0, r0, a1, a0, cw);
        }
        path.close();
        return;
    }

    let (mut a01, mut a11, mut a00, mut a10) = (a0, a1, a0, a1);
    let (mut da0, mut da1) = (da, da);
    let ap = pad_angle / 2.0;
    let rp = if ap > EPSILON {
        (r0 * r0 + r1 * r1).sqrt()
    } else {
        0.0
    };
    let rc = ((r1 - r0).abs() / 2.0).min(corner_radius);
    let (mut rc0, mut rc1) = (rc, rc);

    if rp > EPSILON {
        let sign = if cw { 1.0 } else { -1.0 };
        let p0 = asin(rp / r0 * ap.sin());
        let p1 = asin(rp / r1 * ap.sin());
        da0 -= p0 * 2.0;
        if da0 > EPSILON {
            a00 += p0 * sign;
            a10 -= p0 * sign;
        } else {
            da0 = 0.0;
            a00 = (a0 + a1) / 2.0;
            a10 = a00;
        }
        da1 -= p1 * 2.0;
        if da1 > EPSILON {
            a01 += p1 * sign;
            a11 -= p1 * sign;
        } else {
            da1 = 0.0;
            a01 = (a0 + a1) / 2.0;
            a11 = a01;
        }
    }

    let x01 = r1 * a01.cos();
    let y01 = r1 * a01.sin();
    let x10 = r0 * a10.cos();
    let y10 = r0 * a10.sin();
    let x11 = r1 * a11.cos();
    let y11 = r1 * a11.sin();
    let x00 = r0 * a00.cos();
    let y00 = r0 * a00.sin();

    // Shrink the corners on narrow sectors so they do not overlap.
    if rc > EPSILON && da < PI {
        match intersect(x01, y01, x00, y00, x11, y11, x10, y10) {
            Some((ocx, ocy)) => {
                let (ax, ay) = (x01 - ocx, y01 - ocy);
                let (bx, by) = (x11 - ocx, y11 - ocy);
                let cos = (ax * bx + ay * by) / ((ax * ax + ay * ay).sqrt() * (bx * bx + by * by).sqrt());
                let kc = 1.0 / (cos.clamp(-1.0, 1.0).acos() / 2.0).sin();
                let lc = (ocx * ocx + ocy * ocy).sqrt();
                rc0 = rc.min((r0 - lc) / (kc - 1.0));
                rc1 = rc.min((r1 - lc) / (kc + 1.0));
            }
            None => {
                rc0 = 0.0;
                rc1 = 0.0;
            }
        }
    }

    // Outer edge.
    if !(da1 > EPSILON) {
        path.move_to(x01, y01);
    } else if rc1 > EPSILON {
        let t0 = corner_tangents(x00, y00, x01, y01, r1, rc1, cw);
        let t1 = corner_tangents(x11, y11, x10, y10, r1, rc1, cw);
        path.move_to(t0.cx + t0.x01, t0.cy + t0.y01);
        if rc1 < rc {
            // The two corners meet.
            path.arc(t0.cx, t0.cy, rc1, t0.y01.atan2(t0.x01), t1.y01.atan2(t1.x01), !cw);
        } else {
            path.arc(t0.cx, t0.cy, rc1, t0.y01.atan2(t0.x01), t0.y11.atan2(t0.x11), !cw);
            path.arc(
                0.0,
                0.0,
                r1,
                (t0.cy + t0.y11).atan2(t0.cx + t0.x11),
                (t1.cy + t1.y11).atan2(t1.cx + t1.x11),
                !cw,
            );
            path.arc(t1.cx, t1.cy, rc1, t1.y11.atan2(t1.x11), t1.y01.atan2(t1.x01), !cw);
        }
    } else {
        path.move_to(x01, y01);
        path.arc(0.0, 0.0, r1, a01, a11, !cw);
    }

    // Inner edge.
    if !(r0 > EPSILON) || !(da0 > EPSILON) {
        path.line_to(x10, y10);
    } else if rc0 > EPSILON {
        let t0 = corner_tangents(x10, y10, x11, y11, r0, -rc0, cw);
        let t1 = corner_tangents(x01, y01, x00, y00, r0, -rc0, cw);
        path.line_to(t0.cx + t0.x01, t0.cy + t0.y01);
        if rc0 < rc {
            path.arc(t0.cx, t0.cy, rc0, t0.y01.atan2(t0.x01), t1.y01.atan2(t1.x01), !cw);
        } else {
            path.arc(t0.cx, t0.cy, rc0, t0.y01.atan2(t0.x01), t0.y11.atan2(t0.x11), !cw);
            path.arc(
                0.0,
                0.0,
                r0,
                (t0.cy + t0.y11).atan2(t0.cx + t0.x11),
                (t1.cy + t1.y11).atan2(t1.cx + t1.x11),
                cw,
            );
            path.arc(t1.cx, t1.cy, rc0, t1.y11.atan2(t1.x11), t1.y01.atan2(t1.x01), !cw);
        }
    } else {
        path.arc(0.0, 0.0, r0, a10, a00, cw);
    }

    path.close();
}
