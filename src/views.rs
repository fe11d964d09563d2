//! Pure filter/sort logic behind each task view. Rendering is the caller's
//! concern; these only decide which tasks appear and in what order.

use std::cmp::Reverse;

use chrono::{Days, NaiveDate};

use crate::core::task::Task;

/// The pending/completed toggle every view offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// How many days past today the upcoming view reaches, inclusive.
const UPCOMING_WINDOW_DAYS: u64 = 3;

/// Tasks due today, important ones first, then by time.
pub fn today(tasks: &[Task], today: NaiveDate, filter: StatusFilter) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| t.date == Some(today) && filter.matches(t))
        .cloned()
        .collect();
    out.sort_by_key(|t| (Reverse(t.important), t.time));
    out
}

/// Every task, newest due date first, important before not within a date,
/// then by time. Undated tasks sort last.
pub fn all(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    out.sort_by_key(|t| (t.date.is_none(), Reverse(t.date), Reverse(t.important), t.time));
    out
}

/// Group an already-sorted task list by due date, preserving order.
pub fn group_by_date(tasks: &[Task]) -> Vec<(Option<NaiveDate>, Vec<Task>)> {
    let mut groups: Vec<(Option<NaiveDate>, Vec<Task>)> = Vec::new();
    for task in tasks {
        match groups.last_mut() {
            Some((date, group)) if *date == task.date => group.push(task.clone()),
            _ => groups.push((task.date, vec![task.clone()])),
        }
    }
    groups
}

/// Flagged tasks, by due date then time. Undated tasks sort last.
pub fn important(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| t.important && filter.matches(t))
        .cloned()
        .collect();
    out.sort_by_key(|t| (t.date.is_none(), t.date, t.time));
    out
}

/// Tasks due between today and three days out, inclusive, by date then time.
pub fn upcoming(tasks: &[Task], today: NaiveDate, filter: StatusFilter) -> Vec<Task> {
    let end = today
        .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| {
            t.date.is_some_and(|d| d >= today && d <= end) && filter.matches(t)
        })
        .cloned()
        .collect();
    out.sort_by_key(|t| (t.date, t.time));
    out
}

/// Tasks tagged with the given category.
pub fn category(tasks: &[Task], category_id: i64) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.category_id == Some(category_id))
        .cloned()
        .collect()
}
