use std::path::{Path, PathBuf};

use chrono::Duration;
use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::summary::{CountEntry, DailyCount, TicketSummary};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to draw chart {path}: {message}")]
    Draw { path: String, message: String },
}

/// Which chart of a summary to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Categories,
    Daily,
    TopCustomers,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Categories, ChartKind::Daily, ChartKind::TopCustomers];

    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Categories => "categories",
            ChartKind::Daily => "daily",
            ChartKind::TopCustomers => "top-customers",
        }
    }
}

/// Writes summary charts as SVG files.
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    size: (u32, u32),
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self { size: (1000, 600) }
    }
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
        }
    }

    /// Draws every chart with data into `dir` as `<prefix>-<kind>.svg`.
    /// Charts without data are not written.
    pub fn render_all(
        &self,
        summary: &TicketSummary,
        dir: &Path,
        prefix: &str,
    ) -> Result<Vec<PathBuf>, ChartError> {
        let mut written = Vec::new();
        for kind in ChartKind::ALL {
            let path = dir.join(format!("{prefix}-{}.svg", kind.file_stem()));
            if self.render(kind, summary, &path)? {
                written.push(path);
            }
        }
        Ok(written)
    }

    /// Returns `false` when the summary holds nothing to draw for `kind`.
    pub fn render(
        &self,
        kind: ChartKind,
        summary: &TicketSummary,
        path: &Path,
    ) -> Result<bool, ChartError> {
        let drawn = match kind {
            ChartKind::Categories => self.bar_chart(
                path,
                "Most Raised Ticket Categories",
                "Issue Category",
                &summary.by_category,
            )?,
            ChartKind::Daily => self.daily_chart(path, &summary.daily)?,
            ChartKind::TopCustomers => self.bar_chart(
                path,
                "Top Customers by Ticket Count",
                "Customer",
                &summary.top_customers,
            )?,
        };

        if drawn {
            debug!(chart = kind.file_stem(), path = %path.display(), "chart written");
        }
        Ok(drawn)
    }

    fn bar_chart(
        &self,
        path: &Path,
        caption: &str,
        x_desc: &str,
        entries: &[CountEntry],
    ) -> Result<bool, ChartError> {
        if entries.is_empty() {
            return Ok(false);
        }
        let fail = |err: &dyn std::fmt::Display| draw_error(path, err);

        let max = entries.iter().map(|entry| entry.count).max().unwrap_or(1);
        let labels: Vec<String> = entries.iter().map(|entry| shorten(&entry.label)).collect();

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(|err| fail(&err))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(80)
            .y_label_area_size(56)
            .build_cartesian_2d(0usize..entries.len(), 0usize..max + 1)
            .map_err(|err| fail(&err))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc("Number of Tickets")
            .x_labels(entries.len())
            .x_label_formatter(&|index: &usize| labels.get(*index).cloned().unwrap_or_default())
            .draw()
            .map_err(|err| fail(&err))?;

        chart
            .draw_series(entries.iter().enumerate().map(|(index, entry)| {
                let mut bar = Rectangle::new(
                    [(index, 0), (index + 1, entry.count)],
                    BLUE.mix(0.6).filled(),
                );
                bar.set_margin(0, 0, 4, 4);
                bar
            }))
            .map_err(|err| fail(&err))?;

        root.present().map_err(|err| fail(&err))?;
        Ok(true)
    }

    fn daily_chart(&self, path: &Path, daily: &[DailyCount]) -> Result<bool, ChartError> {
        let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
            return Ok(false);
        };
        let fail = |err: &dyn std::fmt::Display| draw_error(path, err);

        let span = (last.date - first.date).num_days().max(1);
        let max = daily.iter().map(|entry| entry.count).max().unwrap_or(1);
        let origin = first.date;

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(|err| fail(&err))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Tickets per Day", ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .build_cartesian_2d(0i64..span, 0usize..max + 1)
            .map_err(|err| fail(&err))?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Number of Tickets")
            .x_label_formatter(&|offset: &i64| {
                (origin + Duration::days(*offset)).format("%Y-%m-%d").to_string()
            })
            .draw()
            .map_err(|err| fail(&err))?;

        let points: Vec<(i64, usize)> = daily
            .iter()
            .map(|entry| ((entry.date - origin).num_days(), entry.count))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &RED))
            .map_err(|err| fail(&err))?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|point| Circle::new(*point, 3, RED.filled())),
            )
            .map_err(|err| fail(&err))?;

        root.present().map_err(|err| fail(&err))?;
        Ok(true)
    }
}

fn draw_error(path: &Path, err: &dyn std::fmt::Display) -> ChartError {
    ChartError::Draw {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn shorten(label: &str) -> String {
    const MAX: usize = 18;
    if label.chars().count() <= MAX {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(MAX - 1).collect();
        short.push('…');
        short
    }
}
