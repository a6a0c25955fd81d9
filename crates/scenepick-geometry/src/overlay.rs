use super::ui::{Color32, Point2, Rect, Stroke};

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayShape {
    Rect {
        rect: Rect,
        fill: Color32,
    },
    Line {
        start: Point2,
        end: Point2,
        stroke: Stroke,
    },
    Circle {
        center: Point2,
        radius: f32,
        fill: Option<Color32>,
        stroke: Option<Stroke>,
    },
    Polygon {
        points: Vec<Point2>,
        fill: Color32,
        stroke: Stroke,
    },
}

/// Screen-space drawing surface shared by the visible overlay and the pick
/// pass. Polygons are convex.
pub trait OverlayPainter {
    fn rect_filled(&mut self, rect: Rect, fill: Color32);
    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke);
    fn circle_filled(&mut self, center: Point2, radius: f32, fill: Color32);
    fn circle_stroke(&mut self, center: Point2, radius: f32, stroke: Stroke);
    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke);

    fn polyline(&mut self, points: &[Point2], stroke: Stroke) {
        for pair in points.windows(2) {
            self.line_segment(pair[0], pair[1], stroke);
        }
    }

    fn dashed_line(&mut self, start: Point2, end: Point2, dash: f32, gap: f32, stroke: Stroke) {
        let length = start.distance(end);
        let period = (dash + gap).max(1.0);
        if length <= f32::EPSILON {
            return;
        }
        let mut offset = 0.0;
        while offset < length {
            let a = start.lerp(end, offset / length);
            let b = start.lerp(end, ((offset + dash).min(length)) / length);
            self.line_segment(a, b, stroke);
            offset += period;
        }
    }

    fn paint(&mut self, shape: &OverlayShape) {
        match shape {
            OverlayShape::Rect { rect, fill } => self.rect_filled(*rect, *fill),
            OverlayShape::Line { start, end, stroke } => self.line_segment(*start, *end, *stroke),
            OverlayShape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                if let Some(fill) = fill {
                    self.circle_filled(*center, *radius, *fill);
                }
                if let Some(stroke) = stroke {
                    self.circle_stroke(*center, *radius, *stroke);
                }
            }
            OverlayShape::Polygon {
                points,
                fill,
                stroke,
            } => self.polygon(points.clone(), *fill, *stroke),
        }
    }
}

#[derive(Default)]
pub struct OverlayCollector {
    pub shapes: Vec<OverlayShape>,
}

impl OverlayCollector {
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl OverlayPainter for OverlayCollector {
    fn rect_filled(&mut self, rect: Rect, fill: Color32) {
        self.shapes.push(OverlayShape::Rect { rect, fill });
    }

    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        self.shapes.push(OverlayShape::Line { start, end, stroke });
    }

    fn circle_filled(&mut self, center: Point2, radius: f32, fill: Color32) {
        self.shapes.push(OverlayShape::Circle {
            center,
            radius,
            fill: Some(fill),
            stroke: None,
        });
    }

    fn circle_stroke(&mut self, center: Point2, radius: f32, stroke: Stroke) {
        self.shapes.push(OverlayShape::Circle {
            center,
            radius,
            fill: None,
            stroke: Some(stroke),
        });
    }

    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke) {
        self.shapes.push(OverlayShape::Polygon {
            points,
            fill,
            stroke,
        });
    }
}
