//! Timeline (Gantt) view of projects as plain-text bars.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde_json::Value;

use crate::types::{Project, ProjectStatus};

const LABEL_WIDTH: usize = 24;

/// Axis granularity of the rendered timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineTask {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// 0..=100
    pub progress: u8,
    pub dependencies: Vec<String>,
}

fn progress_of(status: ProjectStatus) -> u8 {
    match status {
        ProjectStatus::Complete => 100,
        ProjectStatus::InProgress => 50,
        _ => 0,
    }
}

fn depends_on(project: &Project) -> Vec<String> {
    match project.dependencies.get("depends_on") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(single)) => vec![single.clone()],
        _ => Vec::new(),
    }
}

/// Projects with both planned dates, ordered by start then name.
pub fn tasks_from_projects(projects: &[Project]) -> Vec<TimelineTask> {
    let mut tasks: Vec<TimelineTask> = projects
        .iter()
        .filter_map(|p| {
            let (start, end) = (p.planned_start?, p.planned_end?);
            Some(TimelineTask {
                id: p.id.to_string(),
                name: p.name.clone(),
                start,
                end: end.max(start),
                progress: progress_of(p.status),
                dependencies: depends_on(p),
            })
        })
        .collect();
    tasks.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.name.cmp(&b.name)));
    tasks
}

fn is_tick(date: NaiveDate, view: ViewMode) -> bool {
    match view {
        ViewMode::Day => true,
        ViewMode::Week => date.weekday() == Weekday::Mon,
        ViewMode::Month => date.day() == 1,
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        format!("{name:<width$}")
    } else {
        let cut: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}~")
    }
}

/// Render `tasks` as bars `width` columns wide. Completed portions are drawn
/// with `#`, the remainder with `=`.
pub fn render(tasks: &[TimelineTask], width: usize, view: ViewMode) -> String {
    let (Some(first), Some(last)) = (
        tasks.iter().map(|t| t.start).min(),
        tasks.iter().map(|t| t.end).max(),
    ) else {
        return "No scheduled projects.\n".to_string();
    };
    let width = width.max(10);
    let span_days = (last - first).num_days().max(1) as f64;
    let col_of = |date: NaiveDate| -> usize {
        let offset = (date - first).num_days() as f64 / span_days;
        ((offset * width as f64).round() as usize).min(width)
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{} {first} .. {last} ({} days)\n",
        " ".repeat(LABEL_WIDTH),
        (last - first).num_days()
    ));

    let mut axis = String::with_capacity(width);
    let mut previous: Option<NaiveDate> = None;
    for col in 0..width {
        let date = first + Duration::days((col as f64 / width as f64 * span_days) as i64);
        let tick = previous != Some(date) && is_tick(date, view);
        axis.push(if tick { '|' } else { ' ' });
        previous = Some(date);
    }
    out.push_str(&format!("{} {}\n", " ".repeat(LABEL_WIDTH), axis.trim_end()));

    for task in tasks {
        let from = col_of(task.start);
        let to = col_of(task.end).max(from + 1).min(width.max(from + 1));
        let len = to - from;
        let done = len * task.progress as usize / 100;
        let bar = format!(
            "{}{}{}",
            " ".repeat(from),
            "#".repeat(done),
            "=".repeat(len - done)
        );
        out.push_str(&format!("{} {bar}\n", truncate(&task.name, LABEL_WIDTH)));
    }
    out
}
