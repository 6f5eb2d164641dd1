//! Terminal rendering of the dashboard.
//!
//! Three sections, as on the web page: decisions per year as a line series,
//! granted/denied per court as stacked bars, and the raw filtered table.
//! Chart sections print an empty-state notice instead of an empty chart.

use arrow::util::pretty::pretty_format_batches;
use saudejus_core::{CaseRecord, CourtBar, FilterCriteria, Outcome, YearPoint, cases};
use saudejus_store::{RecordStore, View};
use serde::Serialize;

const BAR_WIDTH: usize = 40;
const GRANTED_CELL: char = '█';
const DENIED_CELL: char = '░';

pub const EMPTY_NOTICE: &str = "No data found for the applied filters.";

// ── Public API ──

/// Print the two filter controls: year bounds and court choices.
pub fn print_options(store: &RecordStore) {
    match store.year_bounds() {
        Some(range) => println!("Years   {}..={}", range.min, range.max),
        None => println!("Years   (no records)"),
    }
    println!("Courts  {}", store.courts().join(", "));
}

/// Print the whole dashboard for one view.
pub fn print_dashboard(view: &View) -> anyhow::Result<()> {
    println!("{}", render_criteria(&view.criteria));
    println!("Showing {} filtered records.", view.records.len());
    println!();

    println!("1. Decision volume by year");
    print!("{}", render_yearly(&view.charts.yearly.series()));
    println!();

    println!("2. Grant rate by court");
    print!("{}", render_courts(&view.charts.matrix.bars()));
    println!();

    println!("3. Records");
    println!("{}", render_table(&view.records)?);
    Ok(())
}

/// Print the chart datasets and the raw table as JSON.
pub fn print_dashboard_json(view: &View) -> anyhow::Result<()> {
    let report = DashboardReport::from(view);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// ── JSON report ──

#[derive(Serialize)]
struct DashboardReport<'a> {
    criteria: &'a FilterCriteria,
    record_count: usize,
    yearly: Vec<YearPoint>,
    courts: Vec<CourtBar>,
    records: &'a [CaseRecord],
}

impl<'a> From<&'a View> for DashboardReport<'a> {
    fn from(view: &'a View) -> Self {
        Self {
            criteria: &view.criteria,
            record_count: view.charts.record_count,
            yearly: view.charts.yearly.series(),
            courts: view.charts.matrix.bars(),
            records: &view.records,
        }
    }
}

// ── Section rendering ──

fn render_criteria(criteria: &FilterCriteria) -> String {
    let courts: Vec<&str> = criteria.courts.iter().map(String::as_str).collect();
    format!(
        "Filters: years {}..={}, courts [{}]",
        criteria.year_range.min,
        criteria.year_range.max,
        courts.join(", ")
    )
}

/// Line series, one row per year present, ascending.
pub(crate) fn render_yearly(series: &[YearPoint]) -> String {
    if series.is_empty() {
        return format!("  {EMPTY_NOTICE}\n");
    }
    let max = series.iter().map(|p| p.count).max().unwrap_or(0);
    let mut out = String::new();
    for point in series {
        let bar = cells(GRANTED_CELL, scaled(point.count, max));
        out.push_str(&format!(
            "  {}  {:<width$} {}\n",
            point.year,
            bar,
            point.count,
            width = BAR_WIDTH
        ));
    }
    out
}

/// Stacked granted/denied bars, one row per court, with the grant rate.
pub(crate) fn render_courts(bars: &[CourtBar]) -> String {
    if bars.is_empty() {
        return format!("  {EMPTY_NOTICE}\n");
    }
    let max = bars.iter().map(|b| b.granted + b.denied).max().unwrap_or(0);
    let court_width = bars.iter().map(|b| b.court.chars().count()).max().unwrap_or(0);

    let mut out = format!(
        "  {GRANTED_CELL} {}   {DENIED_CELL} {}\n",
        Outcome::Granted.display_label(),
        Outcome::Denied.display_label()
    );
    for bar in bars {
        let (granted_cells, denied_cells) = split_cells(bar.granted, bar.denied, max);
        let stacked = format!(
            "{}{}",
            cells(GRANTED_CELL, granted_cells),
            cells(DENIED_CELL, denied_cells)
        );
        out.push_str(&format!(
            "  {:<court_width$}  {:<bar_width$} {:>3} / {:<3} {}\n",
            bar.court,
            stacked,
            bar.granted,
            bar.denied,
            format_rate(bar.grant_rate),
            bar_width = BAR_WIDTH,
        ));
    }
    out
}

/// Raw filtered records via Arrow's pretty printer.
fn render_table(records: &[CaseRecord]) -> anyhow::Result<String> {
    let batch = cases::to_record_batch(records)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

// ── Helpers ──

/// Scale `count` onto `BAR_WIDTH` cells relative to `max`. Non-zero counts get at least one cell.
fn scaled(count: usize, max: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * BAR_WIDTH + max / 2) / max).max(1)
}

/// Scale a stacked bar as a whole, then divide its cells between the two parts.
/// The total never exceeds `BAR_WIDTH`, and each non-zero part keeps a cell when there is room.
fn split_cells(granted: usize, denied: usize, max: usize) -> (usize, usize) {
    let total = granted + denied;
    let width = scaled(total, max);
    if width == 0 {
        return (0, 0);
    }
    let mut granted_cells = (granted * width + total / 2) / total;
    if granted > 0 {
        granted_cells = granted_cells.max(1);
    }
    if denied > 0 && width > 1 {
        granted_cells = granted_cells.min(width - 1);
    }
    (granted_cells, width - granted_cells)
}

fn cells(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("({:.1}% granted)", r * 100.0),
        None => String::new(),
    }
}
