//! Recorded vector paths with SVG output and polyline flattening.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

const EPSILON: f64 = 1e-6;

/// A single drawing instruction. Angles are radians from the positive x-axis,
/// increasing towards positive y (clockwise on a y-down canvas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc {
        cx: f64,
        cy: f64,
        r: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    },
    Close,
}

/// Path recorder mirroring the canvas `moveTo`/`lineTo`/`arc`/`closePath` API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn arc(&mut self, cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        self.commands.push(PathCommand::Arc {
            cx,
            cy,
            r: r.abs(),
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Serializes to an SVG path `d` attribute.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Current point and subpath start, tracked so arcs can be joined.
        let mut current: Option<(f64, f64)> = None;
        let mut start = (0.0, 0.0);

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => {
                    let _ = write!(out, "M{},{}", fmt(x), fmt(y));
                    current = Some((x, y));
                    start = (x, y);
                }
                PathCommand::LineTo { x, y } => {
                    let _ = write!(out, "L{},{}", fmt(x), fmt(y));
                    current = Some((x, y));
                }
                PathCommand::Arc {
                    cx,
                    cy,
                    r,
                    start_angle,
                    end_angle,
                    anticlockwise,
                } => {
                    let x0 = cx + r * start_angle.cos();
                    let y0 = cy + r * start_angle.sin();
                    match current {
                        None => {
                            let _ = write!(out, "M{},{}", fmt(x0), fmt(y0));
                            start = (x0, y0);
                        }
                        Some((x, y)) if (x - x0).abs() > EPSILON || (y - y0).abs() > EPSILON => {
                            let _ = write!(out, "L{},{}", fmt(x0), fmt(y0));
                        }
                        Some(_) => {}
                    }
                    current = Some((x0, y0));
                    if r == 0.0 {
                        continue;
                    }

                    let sweep = u8::from(!anticlockwise);
                    let mut da = if anticlockwise {
                        start_angle - end_angle
                    } else {
                        end_angle - start_angle
                    };
                    if da < 0.0 {
                        da = da % TAU + TAU;
                    }

                    if da > TAU - EPSILON {
                        // A full circle needs two half arcs.
                        let (xm, ym) = (cx - r * start_angle.cos(), cy - r * start_angle.sin());
                        let _ = write!(
                            out,
                            "A{r},{r},0,1,{sweep},{},{}A{r},{r},0,1,{sweep},{},{}",
                            fmt(xm),
                            fmt(ym),
                            fmt(x0),
                            fmt(y0),
                            r = fmt(r),
                        );
                    } else if da > EPSILON {
                        let x1 = cx + r * end_angle.cos();
                        let y1 = cy + r * end_angle.sin();
                        let large = u8::from(da >= PI);
                        let _ = write!(
                            out,
                            "A{r},{r},0,{large},{sweep},{},{}",
                            fmt(x1),
                            fmt(y1),
                            r = fmt(r),
                        );
                        current = Some((x1, y1));
                    }
                }
                PathCommand::Close => {
                    if current.is_some() {
                        out.push('Z');
                        current = Some(start);
                    }
                }
            }
        }
        out
    }

    /// Flattens the path into closed or open polylines, one per subpath.
    /// Arcs are split so no chord deviates from the curve by more than
    /// `tolerance`.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<(f64, f64)>> {
        let tolerance = tolerance.max(EPSILON);
        let mut polylines: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push((x, y));
                }
                PathCommand::LineTo { x, y } => current.push((x, y)),
                PathCommand::Arc {
                    cx,
                    cy,
                    r,
                    start_angle,
                    end_angle,
                    anticlockwise,
                } => {
                    let mut da = if anticlockwise {
                        start_angle - end_angle
                    } else {
                        end_angle - start_angle
                    };
                    if da < 0.0 {
                        da = da % TAU + TAU;
                    }
                    let da = da.min(TAU);
                    let direction = if anticlockwise { -1.0 } else { 1.0 };

                    let steps = if r <= tolerance {
                        1
                    } else {
                        let max_step = 2.0 * (1.0 - tolerance / r).acos();
                        ((da / max_step).ceil() as usize).max(1)
                    };
                    for step in 0..=steps {
                        let angle = start_angle + direction * da * step as f64 / steps as f64;
                        current.push((cx + r * angle.cos(), cy + r * angle.sin()));
                    }
                }
                PathCommand::Close => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }
}

/// Compact number formatting: rounds away float noise and drops a trailing `.0`.
fn fmt(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}
