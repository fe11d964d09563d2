use serde::{Deserialize, Serialize};

/// A user-defined tag with a display color, used to group tasks.
///
/// The category list is global to the profile, not partitioned per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: chrono::Utc::now().timestamp_millis(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The palette seeded on first use.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self { id: 1, name: "Personal".into(), color: "blue".into() },
            Self { id: 2, name: "Work".into(), color: "amber".into() },
            Self { id: 3, name: "Shopping".into(), color: "purple".into() },
            Self { id: 4, name: "Ideas".into(), color: "pink".into() },
        ]
    }
}
