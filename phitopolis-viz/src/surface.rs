//! Drawing surfaces for the network background
//!
//! [`Surface`] is the small set of primitives the background needs.
//! [`Canvas2DSurface`] draws them onto an HTML canvas; tests use an in-memory
//! recorder.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::field::{Circle, Frame, Line};

/// Link stroke: Blue-400
pub const LINK_COLOR: &str = "#60A5FA";
pub const LINK_OPACITY: f64 = 0.15;
pub const LINK_WIDTH: f64 = 1.0;

/// Point fill: brand yellow
pub const POINT_COLOR: &str = "#F6C600";
pub const POINT_OPACITY: f64 = 0.8;

/// Something frames can be drawn onto
pub trait Surface {
    /// Resize the drawable area (in CSS pixels)
    fn set_size(&mut self, width: f64, height: f64);

    /// Remove everything drawn so far
    fn clear(&mut self);

    /// Draw one link segment in the link style
    fn stroke_line(&mut self, line: &Line);

    /// Draw one point in the point style
    fn fill_circle(&mut self, circle: &Circle);

    /// Replace whatever is on the surface with `frame`.
    ///
    /// Lines go first so the points sit on top of them.
    fn draw_frame(&mut self, frame: &Frame) {
        self.clear();
        for line in &frame.lines {
            self.stroke_line(line);
        }
        for circle in &frame.circles {
            self.fill_circle(circle);
        }
    }
}

/// 2D canvas surface
pub struct Canvas2DSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2DSurface {
    /// Create surface from canvas element
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2d context: {:?}", e))?
            .ok_or("2d context not available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for Canvas2DSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        // Transparent: the hero section paints the background color
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn stroke_line(&mut self, line: &Line) {
        self.ctx.set_global_alpha(LINK_OPACITY);
        self.ctx.set_stroke_style_str(LINK_COLOR);
        self.ctx.set_line_width(LINK_WIDTH);

        self.ctx.begin_path();
        self.ctx.move_to(line.x1, line.y1);
        self.ctx.line_to(line.x2, line.y2);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, circle: &Circle) {
        self.ctx.set_global_alpha(POINT_OPACITY);
        self.ctx.set_fill_style_str(POINT_COLOR);

        self.ctx.begin_path();
        self.ctx
            .arc(
                circle.x,
                circle.y,
                circle.radius,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.fill();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One recorded drawing call
    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Resize(f64, f64),
        Clear,
        Line(Line),
        Circle(Circle),
    }

    /// Surface that remembers every call
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        /// Primitives drawn since the most recent clear
        pub fn visible(&self) -> &[Op] {
            let start = self
                .ops
                .iter()
                .rposition(|op| *op == Op::Clear)
                .map_or(0, |i| i + 1);
            &self.ops[start..]
        }

        pub fn last_size(&self) -> Option<(f64, f64)> {
            self.ops.iter().rev().find_map(|op| match op {
                Op::Resize(w, h) => Some((*w, *h)),
                _ => None,
            })
        }
    }

    impl Surface for RecordingSurface {
        fn set_size(&mut self, width: f64, height: f64) {
            self.ops.push(Op::Resize(width, height));
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn stroke_line(&mut self, line: &Line) {
            self.ops.push(Op::Line(*line));
        }

        fn fill_circle(&mut self, circle: &Circle) {
            self.ops.push(Op::Circle(*circle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Op, RecordingSurface};
    use super::*;

    #[test]
    fn draw_frame_clears_then_draws_lines_before_circles() {
        let frame = Frame {
            lines: vec![Line {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
            }],
            circles: vec![
                Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                },
                Circle {
                    x: 10.0,
                    y: 10.0,
                    radius: 2.5,
                },
            ],
        };
        let mut surface = RecordingSurface::default();
        surface.draw_frame(&frame);

        assert_eq!(surface.ops[0], Op::Clear);
        assert!(matches!(surface.ops[1], Op::Line(_)));
        assert!(matches!(surface.ops[2], Op::Circle(_)));
        assert!(matches!(surface.ops[3], Op::Circle(_)));
        assert_eq!(surface.ops.len(), 4);
    }

    #[test]
    fn redrawing_replaces_previous_frame() {
        let mut surface = RecordingSurface::default();
        let first = Frame {
            lines: vec![],
            circles: vec![Circle {
                x: 1.0,
                y: 1.0,
                radius: 1.0,
            }],
        };
        let second = Frame {
            lines: vec![],
            circles: vec![Circle {
                x: 2.0,
                y: 2.0,
                radius: 1.0,
            }],
        };
        surface.draw_frame(&first);
        surface.draw_frame(&second);

        assert_eq!(surface.visible(), &[Op::Circle(second.circles[0])]);
    }
}
