use crate::app::App;
use crate::ui::layout::chart_square;
use crate::ui::theme::{label_style, segment_color, SegmentShade};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use station_sunburst::domain::NodePath;
use station_sunburst::sunburst::{is_emphasized, Segment, SunburstLayout};
use std::collections::HashMap;

/// Inputs that decide how each segment is shaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartFocus<'a> {
    /// Hovered node; everything outside its branch is dimmed.
    pub hovered: Option<&'a NodePath>,
    pub selected: Option<&'a NodePath>,
    pub focused: Option<&'a NodePath>,
}

/// A label printed over the chart, anchored at its first cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub style: Style,
}

pub fn render_sunburst(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" 測站分類 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, area);

    let square = chart_square(area);
    if square.width < 4 || square.height < 2 {
        return;
    }

    let focus = ChartFocus {
        hovered: app.hovered.as_ref(),
        selected: app.selection.as_ref().map(|selection| &selection.path),
        focused: app.focused_path(),
    };
    let layers = rasterize(&app.layout, square, focus);
    let labels = chart_labels(&app.layout, square, focus);

    let canvas = Canvas::default()
        .marker(Marker::HalfBlock)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (color, coords) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
            ctx.layer();
            for label in &labels {
                ctx.print(label.x, label.y, Span::styled(label.text.clone(), label.style));
            }
        });
    f.render_widget(canvas, square);
}

fn shade_of(segment: &Segment, focus: ChartFocus<'_>) -> SegmentShade {
    let path = Some(&segment.path);
    SegmentShade {
        emphasized: is_emphasized(segment, focus.hovered),
        highlighted: focus.selected == path || focus.focused == path,
        decal_sample: false,
    }
}

/// Sample the layout once per half-block pixel of `square`, grouped by colour.
///
/// Each pixel is tested at its centre, so the drawn chart and mouse hit-tests
/// agree cell for cell.
pub fn rasterize(
    layout: &SunburstLayout,
    square: Rect,
    focus: ChartFocus<'_>,
) -> Vec<(Color, Vec<(f64, f64)>)> {
    let width = usize::from(square.width);
    let height = usize::from(square.height) * 2;
    let mut layers: HashMap<Color, Vec<(f64, f64)>> = HashMap::new();

    for row in 0..height {
        let y = 1.0 - (row as f64 + 0.5) / height as f64 * 2.0;
        for col in 0..width {
            let x = (col as f64 + 0.5) / width as f64 * 2.0 - 1.0;
            let Some(segment) = layout.hit_test(x, y) else {
                continue;
            };
            let mut shade = shade_of(segment, focus);
            shade.decal_sample = segment
                .style
                .decal
                .is_some_and(|decal| decal.covers(col, row));
            layers
                .entry(segment_color(segment.style, shade))
                .or_default()
                .push((x, y));
        }
    }

    layers.into_iter().collect()
}

/// Centred labels for every segment wide enough to carry one.
pub fn chart_labels(layout: &SunburstLayout, square: Rect, focus: ChartFocus<'_>) -> Vec<ChartLabel> {
    let width = f64::from(square.width);
    let radius_columns = width / 2.0;

    layout
        .segments()
        .iter()
        .filter_map(|segment| {
            let text = segment.label(radius_columns)?;
            let (x, y) = segment.centroid();
            let columns = Span::raw(text.as_str()).width() as f64;
            let background = segment_color(segment.style, shade_of(segment, focus));
            Some(ChartLabel {
                x: (x - columns / width).max(-1.0),
                y,
                text,
                style: label_style(segment.level(), background),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_sunburst::TAXONOMY;

    fn square() -> Rect {
        Rect::new(0, 0, 40, 20)
    }

    #[test]
    fn rasterized_chart_leaves_hole_and_corners_empty() {
        let layout = SunburstLayout::new(&TAXONOMY);
        let layers = rasterize(&layout, square(), ChartFocus::default());
        let points: Vec<(f64, f64)> = layers.into_iter().flat_map(|(_, coords)| coords).collect();

        assert!(!points.is_empty());
        assert!(points.len() < 40 * 40);
        assert!(points.iter().all(|(x, y)| {
            let radius = x.hypot(*y);
            radius > 0.2 && radius < 0.9
        }));
    }

    #[test]
    fn hovering_dims_other_branches() {
        let layout = SunburstLayout::new(&TAXONOMY);
        let plain = rasterize(&layout, square(), ChartFocus::default());
        let hovered = NodePath::root(0);
        let dimmed = rasterize(
            &layout,
            square(),
            ChartFocus {
                hovered: Some(&hovered),
                ..ChartFocus::default()
            },
        );

        let colours = |layers: &[(Color, Vec<(f64, f64)>)]| {
            let mut colours: Vec<String> = layers.iter().map(|(c, _)| format!("{c:?}")).collect();
            colours.sort();
            colours
        };
        assert_ne!(colours(&plain), colours(&dimmed));
    }

    #[test]
    fn labels_sit_inside_the_chart() {
        let layout = SunburstLayout::new(&TAXONOMY);
        let labels = chart_labels(&layout, Rect::new(0, 0, 80, 40), ChartFocus::default());
        assert!(!labels.is_empty());
        assert!(labels.iter().any(|label| label.text == "地面系統測站"));
        assert!(labels.iter().all(|label| label.x >= -1.0 && label.y.abs() <= 1.0));
    }
}
