//! Freehand marker stroke.

use super::{DrawableId, SerializableColor};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand polyline with fixed thickness and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: DrawableId,
    /// Points in drag order. Never empty.
    pub(crate) points: Vec<Point>,
    /// Line width in surface pixels.
    pub thickness: f64,
    pub color: SerializableColor,
}

impl Stroke {
    /// Start a stroke at `origin`.
    pub fn new(origin: Point, thickness: f64, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![origin],
            thickness,
            color,
        }
    }

    pub fn id(&self) -> DrawableId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Append a drag point.
    pub(crate) fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a stroke holds at least its origin.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether there is at least one segment to draw.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }
}
