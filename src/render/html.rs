//! Interactive plotly figure: grouped bars on top, the comparison table as a
//! plotly table trace underneath. Written as a standalone HTML page or opened
//! in the browser.

use std::{
    env,
    fs::write,
    path::{Path, PathBuf},
};

use plotly::{
    common::{Domain, Marker},
    layout::{Axis, BarMode, Layout, Legend},
    traces::table::{Cells, Fill, Header},
    Bar, Plot, Table, Trace,
};
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::render::{ChartReport, ComparisonTable, X_AXIS_TITLE};

const FIGURE_HEIGHT: usize = 900;
/// Vertical split of the figure: bars above, table below.
const BARS_DOMAIN: [f64; 2] = [0.45, 1.0];
const TABLE_DOMAIN: [f64; 2] = [0.0, 0.38];
const HEADER_FILL: &str = "#FED781";

/// Table trace pinned to the lower part of the figure.
///
/// plotly's `Table` has no domain setter, so the domain is serialised next to it.
#[derive(Serialize, Clone)]
struct TablePanel {
    #[serde(flatten)]
    table: Box<Table<String, String>>,
    domain: Domain,
}

impl TablePanel {
    fn new(table: &ComparisonTable) -> Box<Self> {
        // plotly wants column-major cells.
        let columns = (0..table.headers.len())
            .map(|c| table.rows.iter().map(|row| row[c].clone()).collect())
            .collect();
        let header = Header::new(table.headers.clone())
            .fill(Fill::new().color(HEADER_FILL))
            .align("center");
        let cells = Cells::new(columns).align("center");

        Box::new(Self {
            table: Table::new(header, cells),
            domain: Domain::new().x(&[0.0, 1.0]).y(&TABLE_DOMAIN),
        })
    }
}

impl Trace for TablePanel {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Full figure: one bar trace per deployment plus the comparison table.
pub fn build_plot(report: &ChartReport) -> Plot {
    let mut plot = Plot::new();

    for series in &report.series {
        let hover = format!(
            "<b>{}</b><br>%{{hovertext}}<br>{}: %{{y:.2f}}<extra></extra>",
            series.name,
            report.metric.label()
        );
        plot.add_trace(
            Bar::new(report.categories.clone(), series.values.clone())
                .name(&series.name)
                .marker(Marker::new().color(series.color))
                .hover_text_array(report.hover_text.clone())
                .hover_template(hover),
        );
    }
    plot.add_trace(TablePanel::new(&report.table));

    let title = if report.subtitle.is_empty() {
        format!("<b>{}</b>", report.title)
    } else {
        format!("<b>{}</b><br><sub>{}</sub>", report.title, report.subtitle)
    };

    let layout = Layout::new()
        .title(title.as_str())
        .bar_mode(BarMode::Group)
        .height(FIGURE_HEIGHT)
        .show_legend(true)
        .legend(Legend::new().title("Deployments:"))
        .x_axis(Axis::new().title(X_AXIS_TITLE).domain(&BARS_DOMAIN[..]))
        .y_axis(Axis::new().title(report.metric.label()).domain(&BARS_DOMAIN[..]));

    plot.set_layout(layout);
    plot
}

pub fn write_html(report: &ChartReport, path: &Path) -> Result<()> {
    write(path, build_plot(report).to_html()).map_err(|e| ReportError::io(path, e))
}

/// Writes the figure to a temp page and opens it in the default browser.
pub fn show(report: &ChartReport, file_name: &str) -> Result<PathBuf> {
    let path = env::temp_dir().join(file_name);
    write_html(report, &path)?;
    opener::open(&path).map_err(|e| ReportError::Render {
        path: path.clone(),
        message: e.to_string(),
    })?;
    Ok(path)
}
