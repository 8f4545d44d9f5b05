//! Plain-text line chart for cost-over-time series.

use std::fmt::Write;

use super::money;

/// Widest plot area in columns; longer series are averaged into buckets.
pub const MAX_WIDTH: usize = 60;
const AXIS_WIDTH: usize = 10;

/// One labelled value on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Render `points` as a `height`-row chart with a dollar y axis.
///
/// Output is `height` plot rows, an x axis, and a row naming the first and
/// last labels. An empty series renders a single placeholder line.
pub fn line_chart(points: &[ChartPoint], height: usize) -> String {
    let height = height.max(2);
    let columns = bucket(points);
    if columns.is_empty() {
        return String::from("(no data to chart)\n");
    }

    let min = columns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = columns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = height - 1;
    let row_of = |value: f64| -> usize {
        if span == 0.0 {
            top / 2
        } else {
            (((value - min) / span) * top as f64).round() as usize
        }
    };

    let mut grid = vec![vec![' '; columns.len()]; height];
    let mut previous: Option<usize> = None;
    for (column, value) in columns.iter().enumerate() {
        let row = row_of(*value);
        if let Some(previous) = previous {
            let (low, high) = (previous.min(row), previous.max(row));
            for cell in grid.iter_mut().take(high).skip(low + 1) {
                cell[column] = '|';
            }
        }
        grid[row][column] = '*';
        previous = Some(row);
    }

    let mut out = String::new();
    for row in (0..height).rev() {
        let axis = if row == top {
            money(max)
        } else if row == 0 {
            money(min)
        } else if row == top / 2 && span != 0.0 {
            money(min + span * row as f64 / top as f64)
        } else {
            String::new()
        };
        let line = grid[row].iter().collect::<String>();
        let _ = writeln!(out, "{axis:>AXIS_WIDTH$} |{}", line.trim_end());
    }
    let _ = writeln!(out, "{:>AXIS_WIDTH$} +{}", "", "-".repeat(columns.len()));

    let first = points.first().map(|point| point.label.as_str()).unwrap_or_default();
    let last = points.last().map(|point| point.label.as_str()).unwrap_or_default();
    let gap = (columns.len() + 1).saturating_sub(first.len() + last.len()).max(1);
    let _ = writeln!(out, "{:>AXIS_WIDTH$}  {first}{}{last}", "", " ".repeat(gap));

    out
}

/// Values per plot column, averaging neighbours when there are too many.
fn bucket(points: &[ChartPoint]) -> Vec<f64> {
    if points.len() <= MAX_WIDTH {
        return points.iter().map(|point| point.value).collect();
    }

    (0..MAX_WIDTH)
        .filter_map(|column| {
            let start = column * points.len() / MAX_WIDTH;
            let end = ((column + 1) * points.len() / MAX_WIDTH).max(start + 1);
            let slice = &points[start..end.min(points.len())];
            (!slice.is_empty())
                .then(|| slice.iter().map(|point| point.value).sum::<f64>() / slice.len() as f64)
        })
        .collect()
}
