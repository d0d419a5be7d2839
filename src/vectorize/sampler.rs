//! Reduces curve primitives to an arclength and four control points.
//!
//! Every formula here is part of the dataset contract: ellipse perimeters use
//! the `2πb + 4(a−b)` approximation and ignore the major axis rotation, and
//! arc spans are the plain difference of the two angles. Do not "improve"
//! them without versioning the output.

use crate::entities::EntityType;
use crate::types::Vector2;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Parametric positions of the four control points along a segment
const SEGMENT_STEPS: [f64; 4] = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];

/// Angles of the four control points on a full circle or ellipse
const QUADRANT_ANGLES: [f64; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

/// Length and control points of one output record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub length: f64,
    pub points: [Vector2; 4],
}

impl Sample {
    /// Control points as `[x, y]` pairs
    pub fn args(&self) -> [[f64; 2]; 4] {
        self.points.map(Vector2::to_array)
    }
}

/// How arc angles (stored in degrees) are fed to `cos`/`sin`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcAngleMode {
    /// Convert degrees to radians
    #[default]
    Radians,
    /// Pass the degree values through unchanged, as older datasets did
    LegacyDegrees,
}

/// A drawing primitive reduced to the parameters sampling needs
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        start: Vector2,
        end: Vector2,
    },
    Circle {
        center: Vector2,
        radius: f64,
    },
    Ellipse {
        center: Vector2,
        /// Semi-major axis length
        major: f64,
        /// Minor to major axis ratio
        ratio: f64,
    },
    Arc {
        center: Vector2,
        radius: f64,
        /// Degrees
        start_angle: f64,
        /// Degrees
        end_angle: f64,
    },
    Polyline {
        points: Vec<Vector2>,
        closed: bool,
    },
}

impl Primitive {
    /// Extract the sampling parameters of an entity, projected to XY
    pub fn from_entity(entity: &EntityType) -> Self {
        match entity {
            EntityType::Line(line) => Primitive::Line {
                start: line.start.xy(),
                end: line.end.xy(),
            },
            EntityType::Circle(circle) => Primitive::Circle {
                center: circle.center.xy(),
                radius: circle.radius,
            },
            EntityType::Ellipse(ellipse) => Primitive::Ellipse {
                center: ellipse.center.xy(),
                major: ellipse.major_axis_length(),
                ratio: ellipse.minor_axis_ratio,
            },
            EntityType::Arc(arc) => Primitive::Arc {
                center: arc.center.xy(),
                radius: arc.radius,
                start_angle: arc.start_angle,
                end_angle: arc.end_angle,
            },
            EntityType::LwPolyline(pl) => Primitive::Polyline {
                points: pl.points(),
                closed: pl.is_closed,
            },
            EntityType::Polyline(pl) => Primitive::Polyline {
                points: pl.points(),
                closed: pl.is_closed(),
            },
        }
    }

    /// Sample the primitive; polylines yield one sample per segment
    pub fn samples(&self, arc_mode: ArcAngleMode) -> Vec<Sample> {
        match self {
            Primitive::Line { start, end } => vec![sample_line(*start, *end)],
            Primitive::Circle { center, radius } => vec![sample_circle(*center, *radius)],
            Primitive::Ellipse {
                center,
                major,
                ratio,
            } => vec![sample_ellipse(*center, *major, *ratio)],
            Primitive::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => vec![sample_arc(*center, *radius, *start_angle, *end_angle, arc_mode)],
            Primitive::Polyline { points, closed } => polyline_segments(points, *closed)
                .into_iter()
                .map(|(start, end)| sample_line(start, end))
                .collect(),
        }
    }
}

/// Straight segment sampled at `t = 0, 1/3, 2/3, 1`
pub fn sample_line(start: Vector2, end: Vector2) -> Sample {
    Sample {
        length: start.distance(&end),
        points: SEGMENT_STEPS.map(|t| start.lerp(&end, t)),
    }
}

/// Full circle sampled at the four quadrant angles
pub fn sample_circle(center: Vector2, radius: f64) -> Sample {
    Sample {
        length: TAU * radius,
        points: QUADRANT_ANGLES.map(|theta| center.polar(radius, radius, theta)),
    }
}

/// Axis-aligned ellipse with semi-axes `major` and `major * ratio`
pub fn sample_ellipse(center: Vector2, major: f64, ratio: f64) -> Sample {
    let minor = major * ratio;
    Sample {
        length: TAU * minor + 4.0 * (major - minor),
        points: QUADRANT_ANGLES.map(|theta| center.polar(major, minor, theta)),
    }
}

/// Arc from `start_angle` over `|end_angle - start_angle|` degrees.
///
/// Arcs that cross 0° get the short plain-difference span.
pub fn sample_arc(
    center: Vector2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    mode: ArcAngleMode,
) -> Sample {
    let span = (end_angle - start_angle).abs();
    let points = SEGMENT_STEPS.map(|part| {
        let degrees = start_angle + span * part;
        let theta = match mode {
            ArcAngleMode::Radians => degrees.to_radians(),
            ArcAngleMode::LegacyDegrees => degrees,
        };
        center.polar(radius, radius, theta)
    });
    Sample {
        length: TAU * radius * span / 360.0,
        points,
    }
}

/// Consecutive vertex pairs, plus last-to-first when `closed`
pub fn polyline_segments(points: &[Vector2], closed: bool) -> Vec<(Vector2, Vector2)> {
    let mut segments: Vec<_> = points.windows(2).map(|w| (w[0], w[1])).collect();
    if closed {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            segments.push((last, first));
        }
    }
    segments
}
