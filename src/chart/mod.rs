// Report figures rendered as standalone SVG documents
//
// Each chart function is pure: data plus an explicit ChartTheme in, an
// svg::Document out. No process-global styling state. Empty input degrades
// to an axes-plus-note placeholder so a sparse dataset still produces a
// complete report.

use serde::{Deserialize, Serialize};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

mod bar;
mod scatter;
mod strip;

pub use bar::annual_counts;
pub use scatter::weight_vs_hindfoot;
pub use strip::weight_by_sex_site;

/// Dimensions, palette, and typography shared by the three report figures.
///
/// Passed by value through the render path; there is no global theme
/// registry to mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartTheme {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Outer margin around the plot frame
    pub margin: f64,
    pub font_family: String,
    pub font_size: f64,
    pub title_size: f64,
    pub background: String,
    pub text_color: String,
    pub axis_color: String,
    pub grid_color: String,
    /// Bars, scatter points, and male strip points
    pub primary: String,
    /// Female strip points
    pub secondary: String,
    /// Fitted regression line
    pub accent: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            width: 720,
            height: 480,
            margin: 40.0,
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size: 12.0,
            title_size: 15.0,
            background: "#ffffff".to_string(),
            text_color: "#24292f".to_string(),
            axis_color: "#57606a".to_string(),
            grid_color: "#d8dee4".to_string(),
            primary: "#4e79a7".to_string(),
            secondary: "#e15759".to_string(),
            accent: "#f28e2b".to_string(),
        }
    }
}

impl ChartTheme {
    /// Validate that the canvas leaves room for a plot frame
    pub fn validate(&self) -> Result<(), String> {
        if f64::from(self.width) <= 2.0 * self.margin + 80.0 {
            return Err(format!(
                "chart width {} leaves no plot area inside margin {}",
                self.width, self.margin
            ));
        }
        if f64::from(self.height) <= 2.0 * self.margin + 60.0 {
            return Err(format!(
                "chart height {} leaves no plot area inside margin {}",
                self.height, self.margin
            ));
        }
        if self.font_size <= 0.0 || self.title_size <= 0.0 {
            return Err("font sizes must be positive".to_string());
        }
        Ok(())
    }
}

/// Pixel bounds of the plot area inside the canvas
pub(crate) struct Frame {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Frame {
    pub(crate) fn new(theme: &ChartTheme) -> Self {
        Frame {
            left: theme.margin + 34.0,
            right: f64::from(theme.width) - theme.margin,
            top: theme.margin + 18.0,
            bottom: f64::from(theme.height) - theme.margin - 26.0,
        }
    }

    pub(crate) fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Affine map from data coordinates to pixel coordinates. A collapsed
/// domain maps everything to the middle of the range.
pub(crate) struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub(crate) fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale {
            d0: domain.0,
            d1: domain.1,
            r0: range.0,
            r1: range.1,
        }
    }

    pub(crate) fn map(&self, value: f64) -> f64 {
        if self.d1 == self.d0 {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (value - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }
}

/// Round tick positions covering [min, max], stepped at 1, 2, or 5 times a
/// power of ten
pub(crate) fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if min == max {
        return vec![min];
    }
    let raw_step = (max - min) / target.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let step = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    } * magnitude;

    let mut ticks = Vec::new();
    let mut index = (min / step).ceil() as i64;
    while index as f64 * step <= max + step * 1e-9 {
        ticks.push(index as f64 * step);
        index += 1;
    }
    ticks
}

/// Widen a data domain by 5% on each side so points stay off the frame edge
pub(crate) fn pad_domain(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

pub(crate) fn tick_label(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Canvas with background fill and the document-wide font
pub(crate) fn base_document(theme: &ChartTheme) -> Document {
    Document::new()
        .set("viewBox", (0u32, 0u32, theme.width, theme.height))
        .set("width", theme.width)
        .set("height", theme.height)
        .set("font-family", theme.font_family.as_str())
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", theme.width)
                .set("height", theme.height)
                .set("fill", theme.background.as_str()),
        )
}

pub(crate) fn title_text(theme: &ChartTheme, title: &str) -> Text {
    Text::new(title)
        .set("x", theme.margin)
        .set("y", theme.margin)
        .set("font-size", theme.title_size)
        .set("font-weight", "bold")
        .set("fill", theme.text_color.as_str())
}

/// Horizontal grid lines, y tick labels, and the y axis line
pub(crate) fn y_axis(theme: &ChartTheme, frame: &Frame, ticks: &[f64], scale: &LinearScale) -> Group {
    let mut group = Group::new()
        .set("font-size", theme.font_size)
        .set("fill", theme.text_color.as_str());

    for &tick in ticks {
        let y = scale.map(tick);
        group = group
            .add(
                Line::new()
                    .set("x1", frame.left)
                    .set("x2", frame.right)
                    .set("y1", y)
                    .set("y2", y)
                    .set("stroke", theme.grid_color.as_str())
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(tick_label(tick))
                    .set("x", frame.left - 8.0)
                    .set("y", y + theme.font_size * 0.35)
                    .set("text-anchor", "end"),
            );
    }

    group.add(
        Line::new()
            .set("x1", frame.left)
            .set("x2", frame.left)
            .set("y1", frame.top)
            .set("y2", frame.bottom)
            .set("stroke", theme.axis_color.as_str())
            .set("stroke-width", 1),
    )
}

pub(crate) fn x_axis_line(theme: &ChartTheme, frame: &Frame) -> Line {
    Line::new()
        .set("x1", frame.left)
        .set("x2", frame.right)
        .set("y1", frame.bottom)
        .set("y2", frame.bottom)
        .set("stroke", theme.axis_color.as_str())
        .set("stroke-width", 1)
}

/// Rotated label along the y axis
pub(crate) fn y_axis_title(theme: &ChartTheme, frame: &Frame, label: &str) -> Text {
    let x = theme.margin - 22.0;
    let y = (frame.top + frame.bottom) / 2.0;
    Text::new(label)
        .set("x", x)
        .set("y", y)
        .set("transform", format!("rotate(-90 {x} {y})"))
        .set("text-anchor", "middle")
        .set("font-size", theme.font_size)
        .set("fill", theme.text_color.as_str())
}

/// Centered label below the x axis
pub(crate) fn x_axis_title(theme: &ChartTheme, frame: &Frame, label: &str) -> Text {
    Text::new(label)
        .set("x", (frame.left + frame.right) / 2.0)
        .set("y", f64::from(theme.height) - theme.margin + 28.0)
        .set("text-anchor", "middle")
        .set("font-size", theme.font_size)
        .set("fill", theme.text_color.as_str())
}

/// Placeholder for a figure whose data is entirely absent: the titled frame
/// with a note where the marks would be
pub(crate) fn empty_chart(theme: &ChartTheme, title: &str, note: &str) -> Document {
    let frame = Frame::new(theme);
    base_document(theme)
        .add(title_text(theme, title))
        .add(
            Rectangle::new()
                .set("x", frame.left)
                .set("y", frame.top)
                .set("width", frame.width())
                .set("height", frame.bottom - frame.top)
                .set("fill", "none")
                .set("stroke", theme.axis_color.as_str())
                .set("stroke-width", 1),
        )
        .add(
            Text::new(note)
                .set("x", (frame.left + frame.right) / 2.0)
                .set("y", (frame.top + frame.bottom) / 2.0)
                .set("text-anchor", "middle")
                .set("font-size", theme.font_size)
                .set("fill", theme.axis_color.as_str()),
        )
}
