//! Particle field simulation for the animated network background
//!
//! A fixed set of drifting points confined to the container, plus a random
//! set of links between them that is chosen once and never changes. The
//! simulation advances one fixed step per animation frame, so motion speed
//! follows the display refresh rate rather than wall-clock time.

use rand::Rng;

/// Number of points in the background field
pub const POINT_COUNT: usize = 50;

/// Probability that any given pair of points is linked
pub const LINK_PROBABILITY: f64 = 0.08;

/// Multiplier applied to the `[-0.5, 0.5)` random velocity components
pub const VELOCITY_SCALE: f64 = 1.0;

/// Smallest point radius (inclusive)
pub const MIN_RADIUS: f64 = 1.0;

/// Largest point radius (exclusive)
pub const MAX_RADIUS: f64 = 3.0;

/// What happens when a point crosses the edge of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Turn the velocity back toward the field and let the point overshoot
    /// for a frame. Points are never moved by the boundary itself.
    #[default]
    Reflect,
    /// Turn the velocity back and also pin the point onto the edge.
    Clamp,
}

/// Configuration for field creation
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of points
    pub count: usize,
    /// Independent probability of linking each unordered pair
    pub link_probability: f64,
    /// Velocity component scale
    pub velocity_scale: f64,
    /// Edge behavior
    pub boundary: BoundaryMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: POINT_COUNT,
            link_probability: LINK_PROBABILITY,
            velocity_scale: VELOCITY_SCALE,
            boundary: BoundaryMode::Reflect,
        }
    }
}

/// A moving point
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Index of this point in the field
    pub id: usize,
    /// Position
    pub x: f64,
    pub y: f64,
    /// Per-tick displacement
    pub vx: f64,
    pub vy: f64,
    /// Drawn radius
    pub radius: f64,
}

/// A pair of linked point indices, always `source < target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

/// A line segment to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A filled circle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Drawable output of one field state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// One segment per link, drawn behind the circles
    pub lines: Vec<Line>,
    /// One circle per point
    pub circles: Vec<Circle>,
}

/// The complete simulation state: points, links and bounds
#[derive(Debug, Clone)]
pub struct Field {
    points: Vec<Point>,
    links: Vec<Link>,
    width: f64,
    height: f64,
    boundary: BoundaryMode,
}

/// A dimension a field can be laid out against
fn usable(dimension: f64) -> bool {
    dimension.is_finite() && dimension > 0.0
}

impl Field {
    /// Create a field of randomly placed points and randomly chosen links.
    ///
    /// Returns `None` when either dimension is zero, negative or not finite;
    /// the caller should wait for the container to get a real size.
    pub fn initialize<R: Rng>(
        width: f64,
        height: f64,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Option<Self> {
        if !usable(width) || !usable(height) {
            return None;
        }

        let points: Vec<Point> = (0..config.count)
            .map(|id| Point {
                id,
                x: rng.gen_range(0.0..width),
                y: rng.gen_range(0.0..height),
                vx: (rng.r#gen::<f64>() - 0.5) * config.velocity_scale,
                vy: (rng.r#gen::<f64>() - 0.5) * config.velocity_scale,
                radius: rng.gen_range(MIN_RADIUS..MAX_RADIUS),
            })
            .collect();

        let probability = config.link_probability.clamp(0.0, 1.0);
        let mut links = Vec::new();
        for source in 0..config.count {
            for target in (source + 1)..config.count {
                if rng.gen_bool(probability) {
                    links.push(Link { source, target });
                }
            }
        }

        Some(Self {
            points,
            links,
            width,
            height,
            boundary: config.boundary,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Current bounds as `(width, height)`
    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Advance every point by its velocity.
    ///
    /// A coordinate that ends up outside `[0, extent]` gets its velocity
    /// component pointed back inside, taking effect on the next tick. Under
    /// [`BoundaryMode::Reflect`] the point may sit slightly outside for the
    /// current frame.
    pub fn tick(&mut self) {
        let (width, height) = (self.width, self.height);
        let clamp = self.boundary == BoundaryMode::Clamp;

        for point in &mut self.points {
            point.x += point.vx;
            point.y += point.vy;
            confine(&mut point.x, &mut point.vx, width, clamp);
            confine(&mut point.y, &mut point.vy, height, clamp);
        }
    }

    /// Update the bounds. Points are left where they are; the boundary rule
    /// brings stragglers back over the following ticks.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !usable(width) || !usable(height) {
            return;
        }
        self.width = width;
        self.height = height;
    }

    /// Build the drawable frame for the current state
    pub fn render(&self) -> Frame {
        let lines = self
            .links
            .iter()
            .map(|link| {
                let source = &self.points[link.source];
                let target = &self.points[link.target];
                Line {
                    x1: source.x,
                    y1: source.y,
                    x2: target.x,
                    y2: target.y,
                }
            })
            .collect();

        let circles = self
            .points
            .iter()
            .map(|p| Circle {
                x: p.x,
                y: p.y,
                radius: p.radius,
            })
            .collect();

        Frame { lines, circles }
    }
}

/// Point the velocity back into `[0, extent]` when the coordinate left it.
///
/// Only outward-moving velocities are flipped, so a point stranded outside
/// by a shrink keeps heading back in instead of jittering in place.
fn confine(position: &mut f64, velocity: &mut f64, extent: f64, clamp: bool) {
    if *position < 0.0 {
        if *velocity < 0.0 {
            *velocity = -*velocity;
        }
        if clamp {
            *position = 0.0;
        }
    } else if *position > extent {
        if *velocity > 0.0 {
            *velocity = -*velocity;
        }
        if clamp {
            *position = extent;
        }
    }
}
