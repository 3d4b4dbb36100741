// ============================================================================
// COLOR
// ============================================================================

use crate::path::Path;

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// `count` colors running evenly from `start` to `end`.
pub fn segment_colors(count: usize, start: Color, end: Color) -> Vec<Color> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => (0..n)
            .map(|i| start.lerp(end, i as f64 / (n - 1) as f64))
            .collect(),
    }
}

// ============================================================================
// CANVAS
// ============================================================================

// Vertical samples per pixel row when filling paths.
const SUBSAMPLES: usize = 4;

/// RGBA8 frame buffer view, as handed out by `pixels`.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        self.frame
            .get(idx..idx + 3)
            .map(|rgb| Color::new(rgb[0], rgb[1], rgb[2]))
    }

    /// Alpha-blends `color` over the pixel at (x, y).
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(dst) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r, color.g, color.b];
        for (channel, &value) in dst.iter_mut().zip(src.iter()) {
            *channel = (value as f32 * a + *channel as f32 * (1.0 - a)).round() as u8;
        }
        dst[3] = 0xff;
    }

    /// Fills `path` (even-odd rule) translated by `origin`.
    pub fn fill_path(&mut self, path: &Path, origin: (f64, f64), color: Color) {
        let polygons = path.flatten(0.25);
        let edges: Vec<((f64, f64), (f64, f64))> = polygons
            .iter()
            .flat_map(|points| {
                let n = points.len();
                (0..n).map(move |i| (points[i], points[(i + 1) % n]))
            })
            .map(|((x0, y0), (x1, y1))| {
                (
                    (x0 + origin.0, y0 + origin.1),
                    (x1 + origin.0, y1 + origin.1),
                )
            })
            .collect();
        if edges.is_empty() {
            return;
        }

        let (min_y, max_y) = edges.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (a, b)| {
            (lo.min(a.1).min(b.1), hi.max(a.1).max(b.1))
        });
        let first_row = min_y.floor().max(0.0) as usize;
        let last_row = (max_y.ceil().max(0.0) as usize).min(self.height);

        let mut coverage = vec![0.0f32; self.width];
        let mut crossings: Vec<f64> = Vec::new();
        for row in first_row..last_row {
            coverage.iter_mut().for_each(|c| *c = 0.0);
            for sample in 0..SUBSAMPLES {
                let sy = row as f64 + (sample as f64 + 0.5) / SUBSAMPLES as f64;
                crossings.clear();
                for &((x0, y0), (x1, y1)) in &edges {
                    if (y0 <= sy && y1 > sy) || (y1 <= sy && y0 > sy) {
                        crossings.push(x0 + (sy - y0) / (y1 - y0) * (x1 - x0));
                    }
                }
                crossings.sort_by(|a, b| a.total_cmp(b));
                for span in crossings.chunks_exact(2) {
                    let start = (span[0] - 0.5).ceil().max(0.0) as usize;
                    let end = ((span[1] - 0.5).floor() + 1.0).max(0.0) as usize;
                    for c in coverage.iter_mut().take(end.min(self.width)).skip(start) {
                        *c += 1.0 / SUBSAMPLES as f32;
                    }
                }
            }
            for (x, &alpha) in coverage.iter().enumerate() {
                if alpha > 0.0 {
                    self.blend_pixel(x as i32, row as i32, color, alpha);
                }
            }
        }
    }

    /// Anti-aliased line that narrows from `thickness` at (x0, y0) towards the tip.
    pub fn draw_tapered_line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f32, color: Color) {
        let (x0, y0) = (from.0 as f32, from.1 as f32);
        let (x1, y1) = (to.0 as f32, to.1 as f32);
        let pad = thickness.ceil() + 1.0;
        let min_x = (x0.min(x1) - pad).floor() as i32;
        let max_x = (x0.max(x1) + pad).ceil() as i32;
        let min_y = (y0.min(y1) - pad).floor() as i32;
        let max_y = (y0.max(y1) + pad).ceil() as i32;
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = (dx * dx + dy * dy).max(f32::EPSILON);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 - x0;
                let py = y as f32 - y0;
                let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
                let lx = x0 + t * dx;
                let ly = y0 + t * dy;
                let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
                let local_thickness = thickness * (1.0 - t * 0.95);
                let aa = (1.0 - (dist - local_thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa);
                }
            }
        }
    }

    pub fn draw_circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
        let (cx, cy) = center;
        let reach = radius.ceil() as i32 + 1;
        for y in -reach..=reach {
            for x in -reach..=reach {
                let dist = ((x * x + y * y) as f64).sqrt();
                let aa = 1.0 - (dist - radius).clamp(0.0, 1.0);
                if aa > 0.0 {
                    self.blend_pixel(cx.round() as i32 + x, cy.round() as i32 + y, color, aa as f32);
                }
            }
        }
    }
}
