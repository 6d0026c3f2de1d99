//! Category breakdown charts.
//!
//! Totals can be drawn as horizontal bars in the terminal, or exported as an
//! SVG bar chart when the crate is built with the `svg-chart` feature.

use std::path::{Path, PathBuf};

use super::totals::CategoryTotals;

/// Width, in terminal cells, of the longest bar.
pub const BAR_WIDTH: usize = 40;

/// Reasons a chart could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// There are no totals to draw.
    #[error("No expenses recorded")]
    NoData,

    /// The requested output format was not compiled in.
    #[error("SVG charts are not available in this build (enable the `svg-chart` feature)")]
    Unavailable,

    /// The chart file could not be written.
    #[error("Failed to write chart to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render one text bar per category.
///
/// Each line reads `label │█████ currency amount`, with labels padded to the
/// same width and bars scaled so the largest total spans [`BAR_WIDTH`] cells.
/// Negative totals draw an empty bar.
///
/// # Errors
///
/// Returns [`ChartError::NoData`] when `totals` is empty.
pub fn render_bars(totals: &CategoryTotals, currency: &str) -> Result<Vec<String>, ChartError> {
    let max = totals.max().ok_or(ChartError::NoData)?;
    let label_width = totals
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    Ok(totals
        .iter()
        .map(|(name, total)| {
            let bar = "█".repeat(bar_length(total, max));
            format!("{name:<label_width$} │{bar} {currency} {total:.2}")
        })
        .collect())
}

/// Number of cells for `value` when `max` fills [`BAR_WIDTH`].
///
/// Any positive value gets at least one cell so small categories stay visible.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_length(value: f64, max: f64) -> usize {
    if value <= 0.0 || max <= 0.0 {
        return 0;
    }

    let cells = (value / max * BAR_WIDTH as f64).round() as usize;
    cells.clamp(1, BAR_WIDTH)
}

/// Write the totals as an SVG bar chart.
///
/// # Errors
///
/// Returns [`ChartError::NoData`] for empty totals, [`ChartError::Io`] if the
/// file cannot be written, and [`ChartError::Unavailable`] when the crate was
/// built without the `svg-chart` feature.
#[cfg(feature = "svg-chart")]
pub fn write_svg(totals: &CategoryTotals, currency: &str, path: &Path) -> Result<(), ChartError> {
    let document = svg_chart::document(totals, currency)?;

    svg::save(path, &document).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bars = totals.len(), "svg chart written");
    Ok(())
}

/// Write the totals as an SVG bar chart.
///
/// # Errors
///
/// Always returns [`ChartError::Unavailable`]: this build has no SVG support.
#[cfg(not(feature = "svg-chart"))]
pub fn write_svg(_totals: &CategoryTotals, _currency: &str, _path: &Path) -> Result<(), ChartError> {
    Err(ChartError::Unavailable)
}

#[cfg(feature = "svg-chart")]
mod svg_chart {
    use svg::{
        Document,
        node::{
            Text as TextNode,
            element::{Line, Rectangle, Text},
        },
    };

    use super::{CategoryTotals, ChartError};

    const WIDTH: f64 = 800.0;
    const HEIGHT: f64 = 500.0;
    const MARGIN: f64 = 60.0;
    const BAR_FILL: &str = "#7a5cff";
    const TEXT_FILL: &str = "#2b2b2b";
    const MUTED_FILL: &str = "#7b7b8a";

    fn text(x: f64, y: f64, content: &str) -> Text {
        Text::new()
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", 12)
            .set("fill", TEXT_FILL)
            .add(TextNode::new(content))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(super) fn document(totals: &CategoryTotals, currency: &str) -> Result<Document, ChartError> {
        let max = totals.max().ok_or(ChartError::NoData)?.max(0.0);
        let plot_width = 2.0f64.mul_add(-MARGIN, WIDTH);
        let plot_height = 2.0f64.mul_add(-MARGIN, HEIGHT);
        let slot = plot_width / totals.len() as f64;
        let baseline = HEIGHT - MARGIN;

        let mut document = Document::new()
            .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .add(
                text(WIDTH / 2.0, MARGIN / 2.0, "Expenses by category")
                    .set("font-size", 18)
                    .set("font-weight", "bold"),
            )
            .add(
                text(MARGIN / 2.0, HEIGHT / 2.0, &format!("{currency} (total)"))
                    .set("fill", MUTED_FILL)
                    .set(
                        "transform",
                        format!("rotate(-90 {} {})", MARGIN / 2.0, HEIGHT / 2.0),
                    ),
            )
            .add(
                Line::new()
                    .set("x1", MARGIN)
                    .set("x2", WIDTH - MARGIN)
                    .set("y1", baseline)
                    .set("y2", baseline)
                    .set("stroke", TEXT_FILL)
                    .set("stroke-width", 1),
            );

        for (i, (name, total)) in totals.iter().enumerate() {
            let bar_height = if max > 0.0 {
                total.max(0.0) / max * plot_height
            } else {
                0.0
            };
            let x = (i as f64).mul_add(slot, MARGIN);
            let center = slot.mul_add(0.5, x);

            document = document
                .add(
                    Rectangle::new()
                        .set("x", slot.mul_add(0.15, x))
                        .set("y", baseline - bar_height)
                        .set("width", slot * 0.7)
                        .set("height", bar_height)
                        .set("fill", BAR_FILL),
                )
                .add(text(center, baseline + 18.0, name))
                .add(text(
                    center,
                    baseline - bar_height - 6.0,
                    &format!("{total:.2}"),
                ));
        }

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ExpenseRecord;

    fn totals(records: &[ExpenseRecord]) -> CategoryTotals {
        records.iter().collect()
    }

    #[test]
    fn test_render_bars_empty_is_no_data() {
        let result = render_bars(&CategoryTotals::default(), "$");
        assert!(matches!(result, Err(ChartError::NoData)));
    }

    #[test]
    fn test_render_bars_scales_to_largest() {
        let totals = totals(&[
            ExpenseRecord::new("Food", "", 15.5),
            ExpenseRecord::new("Transport", "", 3.0),
        ]);

        let lines = render_bars(&totals, "$").unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("Food      │{} $ 15.50", "█".repeat(BAR_WIDTH)));
        assert!(lines[1].starts_with("Transport │"));
        assert!(lines[1].ends_with("$ 3.00"));
        assert_eq!(lines[1].matches('█').count(), 8);
    }

    #[test]
    fn test_bar_length_edges() {
        assert_eq!(bar_length(0.0, 10.0), 0);
        assert_eq!(bar_length(-4.0, 10.0), 0);
        assert_eq!(bar_length(0.01, 1000.0), 1);
        assert_eq!(bar_length(10.0, 10.0), BAR_WIDTH);
        assert_eq!(bar_length(5.0, 0.0), 0);
    }

    #[cfg(feature = "svg-chart")]
    #[test]
    fn test_write_svg_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        let totals = totals(&[
            ExpenseRecord::new("Food", "", 15.5),
            ExpenseRecord::new("Transport", "", 3.0),
        ]);

        write_svg(&totals, "$", &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("Expenses by category"));
        assert!(content.contains("Transport"));
        assert_eq!(content.matches("<rect").count(), 2);
    }

    #[cfg(feature = "svg-chart")]
    #[test]
    fn test_write_svg_empty_is_no_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");

        let result = write_svg(&CategoryTotals::default(), "$", &path);

        assert!(matches!(result, Err(ChartError::NoData)));
        assert!(!path.exists());
    }

    #[cfg(not(feature = "svg-chart"))]
    #[test]
    fn test_write_svg_unavailable() {
        let result = write_svg(&CategoryTotals::default(), "$", Path::new("chart.svg"));
        assert!(matches!(result, Err(ChartError::Unavailable)));
    }
}
