//! Weight against hind foot length with the fitted least-squares line

use svg::node::element::{Circle, Group, Line, Text};
use svg::Document;

use super::{
    base_document, empty_chart, nice_ticks, pad_domain, tick_label, title_text, x_axis_line,
    x_axis_title, y_axis, y_axis_title, ChartTheme, Frame, LinearScale,
};
use crate::stats::LinearFit;

const TITLE: &str = "Juvenile hare weight and hind foot length";

/// Scatter of (weight, hindfoot) pairs; the regression line spans the
/// observed weight range when a fit is supplied.
pub fn weight_vs_hindfoot(
    pairs: &[(f64, f64)],
    fit: Option<&LinearFit>,
    theme: &ChartTheme,
) -> Document {
    if pairs.is_empty() {
        return empty_chart(theme, TITLE, "no captures with both measurements");
    }

    let frame = Frame::new(theme);
    let x_min = pairs.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = pairs.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y_min = pairs.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = pairs.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let x_domain = pad_domain(x_min, x_max);
    let y_domain = pad_domain(y_min, y_max);
    let x_scale = LinearScale::new(x_domain, (frame.left, frame.right));
    let y_scale = LinearScale::new(y_domain, (frame.bottom, frame.top));
    let y_ticks = nice_ticks(y_domain.0, y_domain.1, 6);
    let x_ticks = nice_ticks(x_domain.0, x_domain.1, 6);

    let mut x_labels = Group::new()
        .set("font-size", theme.font_size)
        .set("fill", theme.text_color.as_str())
        .set("text-anchor", "middle");
    for &tick in &x_ticks {
        x_labels = x_labels.add(
            Text::new(tick_label(tick))
                .set("x", x_scale.map(tick))
                .set("y", frame.bottom + theme.font_size + 6.0),
        );
    }

    let mut points = Group::new()
        .set("fill", theme.primary.as_str())
        .set("fill-opacity", 0.7);
    for &(x, y) in pairs {
        points = points.add(
            Circle::new()
                .set("cx", x_scale.map(x))
                .set("cy", y_scale.map(y))
                .set("r", 3),
        );
    }

    let mut document = base_document(theme)
        .add(title_text(theme, TITLE))
        .add(y_axis(theme, &frame, &y_ticks, &y_scale))
        .add(x_labels)
        .add(points)
        .add(x_axis_line(theme, &frame))
        .add(x_axis_title(theme, &frame, "weight (g)"))
        .add(y_axis_title(theme, &frame, "hind foot length (mm)"));

    if let Some(fit) = fit {
        if let Some(((x0, y0), (x1, y1))) = clip_to_window(fit, (x_min, x_max), y_domain) {
            document = document.add(
                Line::new()
                    .set("x1", x_scale.map(x0))
                    .set("y1", y_scale.map(y0))
                    .set("x2", x_scale.map(x1))
                    .set("y2", y_scale.map(y1))
                    .set("stroke", theme.accent.as_str())
                    .set("stroke-width", 2),
            );
        }
    }

    document
}

/// Restrict the fitted line to the part of the x interval whose predictions
/// fall inside the y window. Returns the segment endpoints in data
/// coordinates, or None when the line misses the window entirely.
fn clip_to_window(
    fit: &LinearFit,
    x_window: (f64, f64),
    y_window: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (mut lo, mut hi) = x_window;

    if fit.slope == 0.0 {
        if fit.intercept < y_window.0 || fit.intercept > y_window.1 {
            return None;
        }
    } else {
        let x_at = |y: f64| (y - fit.intercept) / fit.slope;
        let (enter, exit) = if fit.slope > 0.0 {
            (x_at(y_window.0), x_at(y_window.1))
        } else {
            (x_at(y_window.1), x_at(y_window.0))
        };
        lo = lo.max(enter);
        hi = hi.min(exit);
        if lo >= hi {
            return None;
        }
    }

    Some(((lo, fit.predict(lo)), (hi, fit.predict(hi))))
}
