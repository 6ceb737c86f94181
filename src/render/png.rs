//! Static PNG export: grouped bars on top, comparison table underneath.

use std::{error::Error, path::Path};

use plotters::{coord::Shift, prelude::*};

use crate::error::{ReportError, Result};
use crate::render::{ChartReport, ComparisonTable, X_AXIS_TITLE};

const PNG_WIDTH: u32 = 1200;
const PNG_HEIGHT: u32 = 900;
/// Chart takes the top 65%, the table the rest.
const CHART_HEIGHT: i32 = 585;

const HEADER_HEIGHT: i32 = 30;
const ROW_HEIGHT: i32 = 25;
const TABLE_MARGIN: i32 = 20;

const HEADER_FILL: RGBColor = RGBColor(0xFE, 0xD7, 0x81);
const GRID_LINE: RGBColor = RGBColor(0xED, 0xEB, 0xF0);
const TEXT_COLOR: RGBColor = RGBColor(0x33, 0x33, 0x33);

pub fn write_png(report: &ChartReport, path: &Path) -> Result<()> {
    draw(report, path).map_err(|e| ReportError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn draw(report: &ChartReport, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (PNG_WIDTH, PNG_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (chart_area, table_area) = root.split_vertically(CHART_HEIGHT);
    draw_bars(report, &chart_area)?;
    draw_table(&report.table, &table_area)?;

    root.present()?;
    Ok(())
}

/// One bar per (slice, deployment); each slice is a unit-wide slot on the x axis.
fn draw_bars(
    report: &ChartReport,
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> std::result::Result<(), Box<dyn Error>> {
    let slots = report.categories.len().max(1);
    let caption = if report.subtitle.is_empty() {
        report.title.clone()
    } else {
        format!("{}  ({})", report.title, report.subtitle)
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..report.y_max())?;

    let categories = &report.categories;
    let slot_label = |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        categories.get(i as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&slot_label)
        .x_desc(X_AXIS_TITLE)
        .y_desc(report.metric.label())
        .draw()?;

    let bar_width = 0.8 / report.series.len().max(1) as f64;

    for (idx, series) in report.series.iter().enumerate() {
        let color = hex_color(series.color);
        let offset = -0.4 + idx as f64 * bar_width;

        chart
            .draw_series(series.values.iter().enumerate().filter_map(|(slot, v)| {
                v.filter(|v| v.is_finite()).map(|v| {
                    let x0 = slot as f64 + offset;
                    Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.filled())
                })
            }))?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

/// Fixed-width grid; rows that do not fit are summarised in a last line.
fn draw_table(
    table: &ComparisonTable,
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
) -> std::result::Result<(), Box<dyn Error>> {
    let (width, height) = area.dim_in_pixel();
    let cols = table.headers.len().max(1) as i32;
    let col_width = (width as i32 - 2 * TABLE_MARGIN) / cols;
    let max_chars = (col_width / 7).max(3) as usize;

    let header_font = ("sans-serif", 13).into_font().color(&TEXT_COLOR);
    let cell_font = ("sans-serif", 12).into_font().color(&TEXT_COLOR);

    let top = 10;
    for (c, header) in table.headers.iter().enumerate() {
        let x0 = TABLE_MARGIN + c as i32 * col_width;
        let cell = [(x0, top), (x0 + col_width, top + HEADER_HEIGHT)];
        area.draw(&Rectangle::new(cell, HEADER_FILL.filled()))?;
        area.draw(&Rectangle::new(cell, GRID_LINE.stroke_width(1)))?;
        area.draw(&Text::new(fit(header, max_chars), (x0 + 5, top + 8), header_font.clone()))?;
    }

    let room = (height as i32 - top - HEADER_HEIGHT - ROW_HEIGHT) / ROW_HEIGHT;
    let shown = table.rows.len().min(room.max(0) as usize);

    for (r, row) in table.rows.iter().take(shown).enumerate() {
        let y0 = top + HEADER_HEIGHT + r as i32 * ROW_HEIGHT;
        for (c, value) in row.iter().enumerate() {
            let x0 = TABLE_MARGIN + c as i32 * col_width;
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + col_width, y0 + ROW_HEIGHT)],
                GRID_LINE.stroke_width(1),
            ))?;
            area.draw(&Text::new(fit(value, max_chars), (x0 + 5, y0 + 6), cell_font.clone()))?;
        }
    }

    if shown < table.rows.len() {
        let y = top + HEADER_HEIGHT + shown as i32 * ROW_HEIGHT + 6;
        let note = format!("... {} more rows (see HTML or CSV export)", table.rows.len() - shown);
        area.draw(&Text::new(note, (TABLE_MARGIN, y), cell_font))?;
    }

    Ok(())
}

/// Truncates to `max` characters, marking the cut with `~`.
fn fit(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

/// `"#f8c518"` to an RGB colour; malformed channels read as 0.
fn hex_color(hex: &str) -> RGBColor {
    let h = hex.trim_start_matches('#');
    let channel = |i: usize| {
        h.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    RGBColor(channel(0), channel(2), channel(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_parses_palette() {
        let RGBColor(r, g, b) = hex_color("#F17322");
        assert_eq!((r, g, b), (0xF1, 0x73, 0x22));
        let RGBColor(r, g, b) = hex_color("#zz");
        assert_eq!((r, g, b), (0, 0, 0));
    }

    #[test]
    fn fit_truncates_long_cells() {
        assert_eq!(fit("prefix", 10), "prefix");
        assert_eq!(fit("very-long-deployment", 6), "very-~");
    }
}
