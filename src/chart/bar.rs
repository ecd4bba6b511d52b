//! Annual juvenile capture counts as a bar chart

use svg::node::element::{Group, Rectangle, Text};
use svg::Document;

use super::{
    base_document, empty_chart, nice_ticks, title_text, x_axis_line, x_axis_title, y_axis,
    y_axis_title, ChartTheme, Frame, LinearScale,
};
use crate::aggregate::YearCount;

const TITLE: &str = "Annual juvenile snowshoe hare captures";

/// One bar per trapping year, counts on the y axis from zero
pub fn annual_counts(counts: &[YearCount], theme: &ChartTheme) -> Document {
    if counts.is_empty() {
        return empty_chart(theme, TITLE, "no juvenile captures recorded");
    }

    let frame = Frame::new(theme);
    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
    let scale = LinearScale::new((0.0, max_count * 1.05), (frame.bottom, frame.top));
    let ticks = nice_ticks(0.0, max_count, 5);

    let slot = frame.width() / counts.len() as f64;
    let bar_width = slot * 0.7;

    let mut bars = Group::new().set("fill", theme.primary.as_str());
    let mut year_labels = Group::new()
        .set("font-size", theme.font_size)
        .set("fill", theme.text_color.as_str())
        .set("text-anchor", "middle");

    for (index, year_count) in counts.iter().enumerate() {
        let x = frame.left + index as f64 * slot + (slot - bar_width) / 2.0;
        let top = scale.map(year_count.count as f64);
        bars = bars.add(
            Rectangle::new()
                .set("x", x)
                .set("y", top)
                .set("width", bar_width)
                .set("height", frame.bottom - top),
        );
        year_labels = year_labels.add(
            Text::new(year_count.year.to_string())
                .set("x", frame.left + (index as f64 + 0.5) * slot)
                .set("y", frame.bottom + theme.font_size + 6.0),
        );
    }

    base_document(theme)
        .add(title_text(theme, TITLE))
        .add(y_axis(theme, &frame, &ticks, &scale))
        .add(bars)
        .add(year_labels)
        .add(x_axis_line(theme, &frame))
        .add(x_axis_title(theme, &frame, "year"))
        .add(y_axis_title(theme, &frame, "captures"))
}
