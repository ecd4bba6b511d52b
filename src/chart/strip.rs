//! Juvenile weight distributions by sex, one panel per trapping site
//!
//! Jittered strip of individual weights per sex category with a median/IQR
//! whisker overlaid at the category center. Jitter offsets are a fixed
//! function of capture index, so rendering is reproducible.

use svg::node::element::{Circle, Group, Line, Text};
use svg::Document;

use super::{
    base_document, empty_chart, nice_ticks, pad_domain, title_text, x_axis_line, y_axis,
    y_axis_title, ChartTheme, Frame, LinearScale,
};
use crate::observation::{Juvenile, Sex, Site};
use crate::stats::describe;

const TITLE: &str = "Juvenile hare weight by sex and site";

/// Horizontal jitter cycle applied by capture index within a category
const JITTER_STEP: f64 = 3.0;
const JITTER_CYCLE: usize = 7;

pub fn weight_by_sex_site(juveniles: &[Juvenile], theme: &ChartTheme) -> Document {
    let weights: Vec<f64> = juveniles
        .iter()
        .filter(|j| j.sex != Sex::Unknown)
        .filter_map(|j| j.weight)
        .collect();
    if weights.is_empty() {
        return empty_chart(theme, TITLE, "no weighed juveniles of known sex");
    }

    let frame = Frame::new(theme);
    let low = weights.iter().copied().fold(f64::INFINITY, f64::min);
    let high = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (low, high) = pad_domain(low, high);
    let scale = LinearScale::new((low, high), (frame.bottom, frame.top));
    let ticks = nice_ticks(low, high, 6);

    let mut document = base_document(theme)
        .add(title_text(theme, TITLE))
        .add(y_axis(theme, &frame, &ticks, &scale))
        .add(x_axis_line(theme, &frame))
        .add(y_axis_title(theme, &frame, "weight (g)"));

    let sites = Site::all();
    let panel_width = frame.width() / sites.len() as f64;

    for (panel, site) in sites.into_iter().enumerate() {
        let panel_left = frame.left + panel as f64 * panel_width;

        if panel > 0 {
            document = document.add(
                Line::new()
                    .set("x1", panel_left)
                    .set("x2", panel_left)
                    .set("y1", frame.top)
                    .set("y2", frame.bottom)
                    .set("stroke", theme.grid_color.as_str())
                    .set("stroke-width", 1),
            );
        }

        document = document.add(
            Text::new(site.label())
                .set("x", panel_left + panel_width / 2.0)
                .set("y", frame.top - 6.0)
                .set("text-anchor", "middle")
                .set("font-size", theme.font_size)
                .set("fill", theme.text_color.as_str()),
        );

        for (slot, sex) in [Sex::Female, Sex::Male].into_iter().enumerate() {
            let center = panel_left + panel_width * (slot as f64 + 1.0) / 3.0;

            document = document.add(
                Text::new(sex.label())
                    .set("x", center)
                    .set("y", frame.bottom + theme.font_size + 6.0)
                    .set("text-anchor", "middle")
                    .set("font-size", theme.font_size)
                    .set("fill", theme.text_color.as_str()),
            );

            let values: Vec<f64> = juveniles
                .iter()
                .filter(|j| j.site == site && j.sex == sex)
                .filter_map(|j| j.weight)
                .collect();
            if values.is_empty() {
                continue;
            }

            document = document.add(quartile_whisker(&values, center, &scale, theme));

            let color = match sex {
                Sex::Female => theme.secondary.as_str(),
                _ => theme.primary.as_str(),
            };
            let mut points = Group::new().set("fill", color).set("fill-opacity", 0.75);
            for (index, &weight) in values.iter().enumerate() {
                points = points.add(
                    Circle::new()
                        .set("cx", center + jitter(index))
                        .set("cy", scale.map(weight))
                        .set("r", 3),
                );
            }
            document = document.add(points);
        }
    }

    document
}

fn jitter(index: usize) -> f64 {
    ((index % JITTER_CYCLE) as f64 - (JITTER_CYCLE / 2) as f64) * JITTER_STEP
}

/// Vertical q1-q3 whisker with a wider median tick, drawn under the points
fn quartile_whisker(values: &[f64], center: f64, scale: &LinearScale, theme: &ChartTheme) -> Group {
    let mut group = Group::new()
        .set("stroke", theme.text_color.as_str())
        .set("stroke-width", 1.5);

    // non-empty by the caller's guard
    if let Ok((q1, median, q3)) = describe::quartiles(values) {
        group = group
            .add(
                Line::new()
                    .set("x1", center)
                    .set("x2", center)
                    .set("y1", scale.map(q1))
                    .set("y2", scale.map(q3)),
            )
            .add(
                Line::new()
                    .set("x1", center - 9.0)
                    .set("x2", center + 9.0)
                    .set("y1", scale.map(median))
                    .set("y2", scale.map(median))
                    .set("stroke-width", 2.5),
            );
    }
    group
}
