// Drawing of the stacked bar charts, as SVG documents.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::survey::*;

const CHART_SIZE: (u32, u32) = (900, 520);

// The "tab" palette, from the best to the worst answer.
const TAB_GREEN: RGBColor = RGBColor(44, 160, 44);
const TAB_OLIVE: RGBColor = RGBColor(188, 189, 34);
const TAB_ORANGE: RGBColor = RGBColor(255, 127, 14);
const TAB_RED: RGBColor = RGBColor(214, 39, 40);

/// The color of each answer, by position on the scale.
pub fn palette(num_categories: usize) -> &'static [RGBColor] {
    match num_categories {
        3 => &[TAB_GREEN, TAB_ORANGE, TAB_RED],
        _ => &[TAB_GREEN, TAB_OLIVE, TAB_ORANGE, TAB_RED],
    }
}

/// Draws one chart. A field without any answer keeps its slot and label, with
/// an empty bar.
///
/// Returns `None` if there is nothing to draw.
pub fn render_chart(chart: &ChartData) -> SurveyResult<Option<String>> {
    if !chart.is_drawable() {
        info!("render_chart: {:?}: no answers, skipping", chart.title);
        return Ok(None);
    }
    for s in chart.series.iter().filter(|s| s.answered == 0) {
        info!(
            "render_chart: {:?}: no answers for {}, leaving its bar empty",
            chart.title, s.field
        );
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        draw_stacked_bars(&root, chart).map_err(|e| SurveyError::RenderingChart {
            title: chart.title.clone(),
            message: e.to_string(),
        })?;
        root.present().map_err(|e| SurveyError::RenderingChart {
            title: chart.title.clone(),
            message: e.to_string(),
        })?;
    }
    debug!("render_chart: {:?}: {} bytes", chart.title, svg.len());
    Ok(Some(svg))
}

fn draw_stacked_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartData,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut cc = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 16))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..chart.series.len() as f64, 0f64..100f64)?;

    // The bars are labeled below, one label per field.
    cc.configure_mesh()
        .disable_x_mesh()
        .y_labels(11)
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|y| format!("{:.0}", y))
        .x_desc(format!("Responses (n={})", chart.respondents))
        .y_desc("Percentage")
        .draw()?;

    let label_style =
        TextStyle::from(("sans-serif", 13).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (field_idx, s) in chart.series.iter().enumerate() {
        let (x, y) = cc.backend_coord(&(field_idx as f64 + 0.5, 0.0));
        root.draw(&Text::new(s.label.clone(), (x, y + 6), label_style.clone()))?;
    }

    let colors = palette(chart.categories.len());
    for (cat_idx, category) in chart.categories.iter().enumerate() {
        let color = colors[cat_idx % colors.len()];
        let bars: Vec<Rectangle<(f64, f64)>> = chart
            .series
            .iter()
            .enumerate()
            .filter_map(|(field_idx, s)| s.percentages().map(|pcts| (field_idx, pcts)))
            .map(|(field_idx, pcts)| {
                let bottom: f64 = pcts.iter().take(cat_idx).map(|(_, p)| p).sum();
                let top = bottom + pcts.get(cat_idx).map(|(_, p)| *p).unwrap_or(0.0);
                let x = field_idx as f64;
                Rectangle::new([(x + 0.2, bottom), (x + 0.8, top)], color.filled())
            })
            .collect();
        cc.draw_series(bars)?
            .label(*category)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    cc.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}
