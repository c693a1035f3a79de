use ratatui::style::{Color, Modifier, Style};
use station_sunburst::domain::{NodeStyle, Rgb};

/// Brightness kept by segments outside the hovered branch.
const DIMMED: f64 = 0.35;
/// Brightness of decal hatching over exception segments.
const DECAL_SHADE: f64 = 0.6;
/// Share of white mixed into the selected or focused segment.
const HIGHLIGHT: f64 = 0.3;

pub const fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

fn lighten(color: Rgb, amount: f64) -> Rgb {
    let mix = |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * amount).round() as u8;
    Rgb(mix(color.0), mix(color.1), mix(color.2))
}

/// How one chart sample of a segment is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentShade {
    pub emphasized: bool,
    pub highlighted: bool,
    pub decal_sample: bool,
}

pub fn segment_rgb(style: NodeStyle, shade: SegmentShade) -> Rgb {
    let mut color = style.color;
    if shade.highlighted {
        color = lighten(color, HIGHLIGHT);
    }
    if shade.decal_sample && style.decal.is_some() {
        color = color.scaled(DECAL_SHADE);
    }
    if !shade.emphasized {
        color = color.scaled(DIMMED);
    }
    color
}

pub fn segment_color(style: NodeStyle, shade: SegmentShade) -> Color {
    rgb(segment_rgb(style, shade))
}

/// Label style per ring: bold white on the inner ring, dark text outside.
pub fn label_style(level: usize, background: Color) -> Style {
    if level == 0 {
        Style::default()
            .fg(Color::White)
            .bg(background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(0x33, 0x33, 0x33)).bg(background)
    }
}

pub fn key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
