use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in identity, stored as the session document.
///
/// One capability-tagged shape covers both registration paths: accounts
/// created locally and accounts established through the federated sign-in
/// flow. The id is opaque everywhere else in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Account {
    Local {
        id: String,
        name: String,
        email: String,
        created: NaiveDateTime,
    },
    Federated {
        /// Subject claim of the verified identity token.
        id: String,
        name: String,
        email: String,
        created: NaiveDateTime,
    },
}

impl Account {
    pub fn new_local(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::Local {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            created: chrono::Local::now().naive_local(),
        }
    }

    pub fn new_federated(
        subject: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::Federated {
            id: subject.into(),
            name: name.into(),
            email: email.into(),
            created: chrono::Local::now().naive_local(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Local { id, .. } | Self::Federated { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Local { name, .. } | Self::Federated { name, .. } => name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Local { email, .. } | Self::Federated { email, .. } => email,
        }
    }
}
