//! Bar charts: the rating histogram and ranked complaint-term charts.

use std::collections::BTreeMap;

use plotters::prelude::*;

use crate::analysis::ngrams::TermCount;
use crate::charts::{render_err, ChartError, CANVAS_SIZE};

pub const RATINGS_COLOR: RGBColor = RGBColor(0x42, 0x85, 0xF4);

/// Leaves headroom above the tallest bar.
fn axis_max(max_count: u32) -> u32 {
    max_count + max_count / 10 + 1
}

/// Vertical bars for star ratings 1 through 5.
pub fn render_rating_bars(
    title: &str,
    distribution: &BTreeMap<u8, usize>,
) -> Result<String, ChartError> {
    let max_count = distribution.values().copied().max().unwrap_or(0) as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CANVAS_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 40))
            .margin(30)
            .x_label_area_size(80)
            .y_label_area_size(100)
            .build_cartesian_2d((1u32..5u32).into_segmented(), 0u32..axis_max(max_count))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Rating")
            .y_desc("Count")
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::Exact(r) | SegmentValue::CenterOf(r) => r.to_string(),
                SegmentValue::Last => String::new(),
            })
            .axis_desc_style(("sans-serif", 30))
            .label_style(("sans-serif", 26))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(RATINGS_COLOR.filled())
                    .margin(20)
                    .data(
                        distribution
                            .iter()
                            .map(|(rating, count)| (u32::from(*rating), *count as u32)),
                    ),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Horizontal bars, one per term, with the most frequent term on top.
///
/// The y axis has one spare segment below the last term so a single-term
/// chart still has a non-degenerate range.
pub fn render_term_bars(
    title: &str,
    items: &[TermCount],
    color: RGBColor,
) -> Result<String, ChartError> {
    if items.is_empty() {
        return Err(ChartError::NoData);
    }

    let n = items.len() as u32;
    let max_count = items.iter().map(|(_, c)| *c).max().unwrap_or(0) as u32;

    // Row `n - i` holds item `i`, so item 0 lands at the top.
    let label_for = |row: &u32| -> String {
        if *row == 0 || *row > n {
            return String::new();
        }
        items[(n - *row) as usize].0.clone()
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CANVAS_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 40))
            .margin(30)
            .x_label_area_size(60)
            .y_label_area_size(420)
            .build_cartesian_2d(0u32..axis_max(max_count), (0u32..n).into_segmented())
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels((n + 2) as usize)
            .y_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::Exact(r) | SegmentValue::CenterOf(r) => label_for(r),
                SegmentValue::Last => String::new(),
            })
            .label_style(("sans-serif", 24))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                Histogram::horizontal(&chart)
                    .style(color.filled())
                    .margin(8)
                    .data(
                        items
                            .iter()
                            .enumerate()
                            .map(|(i, (_, count))| (n - i as u32, *count as u32)),
                    ),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}
