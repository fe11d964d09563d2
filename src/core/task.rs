use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::sync::{SEED_ID_MAX, account_bucket};

/// Who a task belongs to.
///
/// Seed tasks from the demo pool carry the pool's small numeric user id;
/// locally-created tasks carry the opaque account id. Serialized untagged,
/// so the stored JSON holds a plain number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskOwner {
    Seed(u32),
    Account(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub owner: TaskOwner,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub important: bool,
    pub category_id: Option<i64>,
    pub completed: bool,
    pub created: NaiveDateTime,
}

/// What the add-task form submits.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub important: bool,
    pub category_id: Option<i64>,
}

/// A partial edit. `None` leaves the field untouched; `category_id` uses a
/// nested option so an edit can clear the category.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub important: Option<bool>,
    pub category_id: Option<Option<i64>>,
}

impl Task {
    /// Create a locally-owned task. The millisecond timestamp id keeps
    /// local ids above [`SEED_ID_MAX`], which is how seed and local tasks
    /// are told apart.
    pub fn new_local(draft: TaskDraft, account_id: impl Into<String>) -> Self {
        Self {
            id: chrono::Utc::now().timestamp_millis(),
            owner: TaskOwner::Account(account_id.into()),
            title: draft.title,
            date: draft.date,
            time: draft.time,
            important: draft.important,
            category_id: draft.category_id,
            completed: false,
            created: chrono::Local::now().naive_local(),
        }
    }

    pub fn is_seed(&self) -> bool {
        self.id <= SEED_ID_MAX
    }

    /// Visibility invariant: a seed task belongs to the account whose hash
    /// bucket matches its pool user id; a local task belongs to the account
    /// that created it.
    pub fn belongs_to(&self, account_id: &str) -> bool {
        match &self.owner {
            TaskOwner::Seed(bucket) => *bucket == account_bucket(account_id),
            TaskOwner::Account(owner) => owner == account_id,
        }
    }

    /// Flip the completion flag and nothing else.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
        if let Some(time) = patch.time {
            self.time = Some(time);
        }
        if let Some(important) = patch.important {
            self.important = important;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_task_id_exceeds_seed_range() {
        let task = Task::new_local(
            TaskDraft {
                title: "Buy milk".to_string(),
                ..TaskDraft::default()
            },
            "u1",
        );
        assert!(task.id > SEED_ID_MAX);
        assert!(!task.is_seed());
        assert!(task.belongs_to("u1"));
        assert!(!task.belongs_to("u2"));
    }

    #[test]
    fn seed_task_ownership_follows_bucket() {
        let bucket = account_bucket("u1");
        let task = Task {
            id: 12,
            owner: TaskOwner::Seed(bucket),
            title: "Seed".to_string(),
            date: None,
            time: None,
            important: false,
            category_id: None,
            completed: false,
            created: chrono::Local::now().naive_local(),
        };
        assert!(task.is_seed());
        assert!(task.belongs_to("u1"));
    }

    #[test]
    fn toggle_flips_only_completed() {
        let mut task = Task::new_local(
            TaskDraft {
                title: "Water plants".to_string(),
                important: true,
                ..TaskDraft::default()
            },
            "u1",
        );
        let before = task.clone();
        task.toggle();
        assert!(task.completed);
        assert_eq!(task.title, before.title);
        assert_eq!(task.important, before.important);
        assert_eq!(task.date, before.date);
        task.toggle();
        assert_eq!(task, before);
    }

    #[test]
    fn patch_can_clear_category() {
        let mut task = Task::new_local(
            TaskDraft {
                title: "Refile".to_string(),
                category_id: Some(2),
                ..TaskDraft::default()
            },
            "u1",
        );
        task.apply(TaskPatch {
            category_id: Some(None),
            ..TaskPatch::default()
        });
        assert_eq!(task.category_id, None);
        // An empty patch leaves everything alone
        let before = task.clone();
        task.apply(TaskPatch::default());
        assert_eq!(task, before);
    }

    #[test]
    fn owner_serializes_untagged() {
        let seed = serde_json::to_value(TaskOwner::Seed(7)).unwrap();
        assert_eq!(seed, serde_json::json!(7));
        let local = serde_json::to_value(TaskOwner::Account("u1".into())).unwrap();
        assert_eq!(local, serde_json::json!("u1"));
    }
}
