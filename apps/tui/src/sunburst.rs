//! Sunburst geometry for the classification taxonomy.
//!
//! Coordinates are normalized: the chart centre is `(0, 0)`, the outer edge of
//! the drawing area is radius 1 and `y` grows upwards. Angles are radians
//! measured clockwise from 12 o'clock.

use crate::domain::{ClassificationNode, NodePath, NodeStyle};
use std::f64::consts::TAU;

pub const INNER_RADIUS: f64 = 0.2;
pub const OUTER_RADIUS: f64 = 0.9;
/// Width of the blank gap drawn between neighbouring segments.
pub const BORDER_WIDTH: f64 = 0.02;
/// Segments narrower than this get no label.
pub const MIN_LABEL_ANGLE: f64 = 5.0 * std::f64::consts::PI / 180.0;
/// Maximum label length in glyphs, by ring.
const LEVEL_LABEL_GLYPHS: [usize; 2] = [6, 4];

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub path: NodePath,
    pub name: &'static str,
    pub style: NodeStyle,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Segment {
    pub fn level(&self) -> usize {
        self.path.level()
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Centre of the segment, used as the label anchor.
    pub fn centroid(&self) -> (f64, f64) {
        to_cartesian(self.mid_angle(), self.mid_radius())
    }

    fn contains(&self, angle: f64, radius: f64) -> bool {
        let half_border = BORDER_WIDTH / 2.0;
        if radius < self.inner_radius + half_border || radius >= self.outer_radius - half_border {
            return false;
        }
        if angle < self.start_angle || angle >= self.end_angle {
            return false;
        }
        // Arc distance to the nearest radial edge.
        let edge = (angle - self.start_angle).min(self.end_angle - angle) * radius;
        edge >= half_border
    }

    /// Label text fitted to the arc, `None` when the segment is too small.
    ///
    /// `radius_columns` is the chart radius in terminal columns; glyphs are
    /// assumed to be two columns wide.
    pub fn label(&self, radius_columns: f64) -> Option<String> {
        if self.sweep() < MIN_LABEL_ANGLE {
            return None;
        }
        let arc_columns = self.sweep() * self.mid_radius() * radius_columns;
        let level_cap = LEVEL_LABEL_GLYPHS
            .get(self.level())
            .copied()
            .unwrap_or(LEVEL_LABEL_GLYPHS[LEVEL_LABEL_GLYPHS.len() - 1]);
        let glyphs = ((arc_columns / 2.0).floor() as usize).min(level_cap);
        truncate_label(self.name, glyphs)
    }
}

/// Convert polar chart coordinates to normalized cartesian ones.
pub fn to_cartesian(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

/// Convert normalized cartesian coordinates to `(angle, radius)`.
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    (x.atan2(y).rem_euclid(TAU), x.hypot(y))
}

/// Shorten `name` to at most `max_glyphs` glyphs, marking the cut with an ellipsis.
pub fn truncate_label(name: &str, max_glyphs: usize) -> Option<String> {
    if max_glyphs == 0 {
        return None;
    }
    let count = name.chars().count();
    if count <= max_glyphs {
        return Some(name.to_string());
    }
    let mut label: String = name.chars().take(max_glyphs - 1).collect();
    label.push('…');
    Some(label)
}

#[derive(Debug, Clone, Default)]
pub struct SunburstLayout {
    segments: Vec<Segment>,
}

impl SunburstLayout {
    pub fn new(forest: &'static [ClassificationNode]) -> Self {
        let total: usize = forest.iter().map(ClassificationNode::leaf_weight).sum();
        let depth = forest.iter().map(ClassificationNode::depth).max().unwrap_or(1);
        if total == 0 {
            return Self::default();
        }

        let ring_width = (OUTER_RADIUS - INNER_RADIUS) / depth as f64;
        let angle_per_leaf = TAU / total as f64;
        let mut segments = Vec::new();
        let mut cursor = 0.0;
        for (index, node) in forest.iter().enumerate() {
            cursor = place(
                node,
                NodePath::root(index),
                cursor,
                angle_per_leaf,
                ring_width,
                &mut segments,
            );
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment under a normalized point; gaps, the hole and the outside miss.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Segment> {
        let (angle, radius) = to_polar(x, y);
        self.segments
            .iter()
            .find(|segment| segment.contains(angle, radius))
    }
}

fn place(
    node: &'static ClassificationNode,
    path: NodePath,
    start: f64,
    angle_per_leaf: f64,
    ring_width: f64,
    out: &mut Vec<Segment>,
) -> f64 {
    let end = (node.leaf_weight() as f64).mul_add(angle_per_leaf, start);
    let inner = (path.level() as f64).mul_add(ring_width, INNER_RADIUS);

    let mut child_cursor = start;
    for (index, child) in node.children.iter().enumerate() {
        child_cursor = place(
            child,
            path.child(index),
            child_cursor,
            angle_per_leaf,
            ring_width,
            out,
        );
    }

    out.push(Segment {
        path,
        name: node.name,
        style: node.style,
        start_angle: start,
        end_angle: end,
        inner_radius: inner,
        outer_radius: inner + ring_width,
    });
    end
}

/// Whether `segment` keeps full colour while `focus` (the hovered node) is
/// emphasized.
///
/// The focused node and its ancestors stay full colour; with no focus every
/// segment does.
pub fn is_emphasized(segment: &Segment, focus: Option<&NodePath>) -> bool {
    focus.map_or(true, |focus| segment.path.is_ancestor_of(focus))
}
