use crate::core::account::Account;
use crate::core::category::Category;
use crate::core::task::{Task, TaskDraft, TaskPatch};
use crate::storage::LocalStore;
use crate::sync::remote::RemoteClient;
use crate::sync::{account_bucket, reconcile};

/// Session-scoped task state.
///
/// Constructed at sign-in, dropped at sign-out. The local record is the
/// source of truth: every mutation rewrites it synchronously, then mirrors
/// to the demo API as a best-effort call whose failure is only logged.
pub struct TodoStore {
    account: Account,
    storage: LocalStore,
    remote: RemoteClient,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    loading: bool,
    error: Option<String>,
}

impl TodoStore {
    pub fn open(account: Account, storage: LocalStore, remote: RemoteClient) -> Self {
        if let Err(e) = storage.config().ensure_dirs() {
            log::error!("Failed to create data directory: {}", e);
        }
        let categories = storage.read_categories();
        Self {
            account,
            storage,
            remote,
            tasks: Vec::new(),
            categories,
            loading: false,
            error: None,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the local cache, then merge in the account's share of the
    /// remote seed pool. A fetch failure leaves the local data in place
    /// and sets the error state; `retry` runs this again.
    pub async fn initialize(&mut self) {
        self.loading = true;
        self.error = None;

        let local = self.storage.read_tasks(self.account.id());
        log::info!(
            "Loaded {} local tasks for account {}",
            local.len(),
            self.account.id()
        );
        self.tasks = local;

        match self.remote.fetch_pool().await {
            Ok(pool) => {
                let pool: Vec<Task> = pool.into_iter().map(|t| t.into_task()).collect();
                let merged = reconcile(&self.tasks, &pool, self.account.id());
                log::info!(
                    "Merged remote pool: {} tasks for bucket {}",
                    merged.len(),
                    account_bucket(self.account.id())
                );
                self.tasks = merged;
                self.persist_tasks();
            }
            Err(e) => {
                log::error!("Error initializing todos: {}", e);
                self.error = Some("Failed to load todos".to_string());
            }
        }

        self.loading = false;
    }

    pub async fn retry(&mut self) {
        self.initialize().await;
    }

    /// Create a task owned by the active account. The local write is
    /// durable before the mirror call is attempted.
    pub async fn add_todo(&mut self, draft: TaskDraft) -> i64 {
        let task = Task::new_local(draft, self.account.id());
        let id = task.id;
        let title = task.title.clone();
        let completed = task.completed;

        self.tasks.push(task);
        self.persist_tasks();

        let bucket = account_bucket(self.account.id());
        if let Err(e) = self.remote.add_todo(&title, completed, bucket).await {
            log::error!("Failed to sync todo with API: {}", e);
        }

        id
    }

    /// Edit a task. No-op when the id is unknown or the task belongs to a
    /// different account.
    pub async fn update_todo(&mut self, id: i64, patch: TaskPatch) {
        let Some(task) = self.owned_task_mut(id) else {
            return;
        };
        task.apply(patch);
        let completed = task.completed;
        self.persist_tasks();

        if let Err(e) = self.remote.update_todo(id, completed).await {
            log::error!("Failed to sync todo with API: {}", e);
        }
    }

    /// Flip a task's completion flag. No-op for foreign tasks.
    pub async fn toggle_todo(&mut self, id: i64) {
        let Some(task) = self.owned_task_mut(id) else {
            return;
        };
        task.toggle();
        let completed = task.completed;
        self.persist_tasks();

        if let Err(e) = self.remote.update_todo(id, completed).await {
            log::error!("Failed to sync todo with API: {}", e);
        }
    }

    /// Remove a task. No-op for foreign tasks.
    pub async fn delete_todo(&mut self, id: i64) {
        let owned = self
            .tasks
            .iter()
            .any(|t| t.id == id && t.belongs_to(self.account.id()));
        if !owned {
            return;
        }

        self.tasks.retain(|t| t.id != id);
        self.persist_tasks();

        if let Err(e) = self.remote.delete_todo(id).await {
            log::error!("Failed to sync todo with API: {}", e);
        }
    }

    pub fn add_category(&mut self, name: &str, color: &str) -> i64 {
        let category = Category::new(name, color);
        let id = category.id;
        self.categories.push(category);
        self.persist_categories();
        id
    }

    pub fn update_category(&mut self, updated: Category) {
        for category in &mut self.categories {
            if category.id == updated.id {
                *category = updated;
                break;
            }
        }
        self.persist_categories();
    }

    pub fn delete_category(&mut self, id: i64) {
        self.categories.retain(|c| c.id != id);
        self.persist_categories();
    }

    /// Tear the session down: clears the stored session record and
    /// consumes the store.
    pub fn sign_out(self) -> Result<(), crate::storage::StorageError> {
        log::info!("Signing out account {}", self.account.id());
        self.storage.clear_session()
    }

    fn owned_task_mut(&mut self, id: i64) -> Option<&mut Task> {
        let account_id = self.account.id().to_string();
        self.tasks
            .iter_mut()
            .find(|t| t.id == id && t.belongs_to(&account_id))
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = self.storage.write_tasks(self.account.id(), &self.tasks) {
            log::error!("Error saving todos to storage: {}", e);
        }
    }

    fn persist_categories(&mut self) {
        if let Err(e) = self.storage.write_categories(&self.categories) {
            log::error!("Error saving categories to storage: {}", e);
        }
    }
}
