pub mod remote;

use crate::core::task::Task;

/// Highest task id the demo pool hands out. Anything above this is a
/// locally-created task (millisecond-timestamp ids).
pub const SEED_ID_MAX: i64 = 150;

/// Map an opaque account id onto the demo pool's small numeric user-id
/// space, [1, 100].
///
/// Rolling hash over the UTF-16 code units with 32-bit wrapping. Deterministic
/// and stable per account; two accounts may share a bucket and will then
/// see the same seed tasks. A documented approximation, not a uniqueness
/// or security mechanism.
pub fn account_bucket(account_id: &str) -> u32 {
    let mut hash: i64 = 0;
    for unit in account_id.encode_utf16() {
        // The shift truncates to 32 bits; the surrounding arithmetic does not.
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        hash = unit as i64 + shifted - hash;
    }
    ((hash % 100).unsigned_abs() + 1) as u32
}

/// Merge the account's local cache with the remote seed pool.
///
/// Set union by task id: every local task is kept as-is and pool tasks in
/// the account's bucket are appended unless a local copy of that id exists
/// (local wins). Pure and idempotent; callers persist the result.
pub fn reconcile(local: &[Task], pool: &[Task], account_id: &str) -> Vec<Task> {
    let mut merged: Vec<Task> = local.to_vec();

    for seed in pool {
        if !seed.belongs_to(account_id) {
            continue;
        }
        if merged.iter().any(|t| t.id == seed.id) {
            continue;
        }
        merged.push(seed.clone());
    }

    log::debug!(
        "Reconciled {} local + {} pool tasks into {} for bucket {}",
        local.len(),
        pool.len(),
        merged.len(),
        account_bucket(account_id)
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::task::{TaskDraft, TaskOwner};

    fn seed_task(id: i64, bucket: u32) -> Task {
        Task {
            id,
            owner: TaskOwner::Seed(bucket),
            title: format!("Seed {}", id),
            date: None,
            time: None,
            important: false,
            category_id: None,
            completed: false,
            created: chrono::Local::now().naive_local(),
        }
    }

    #[test]
    fn bucket_is_deterministic_and_in_range() {
        for id in ["u1", "alice@example.com", "f3b9d2c4-1e0a-4d7b-9c3f-2a8e6b5d4c1a", ""] {
            let first = account_bucket(id);
            assert_eq!(first, account_bucket(id));
            assert!((1..=100).contains(&first), "{} -> {}", id, first);
        }
    }

    #[test]
    fn bucket_distinguishes_most_accounts() {
        // Not a collision-freedom guarantee, just a sanity check that the
        // hash actually varies with its input.
        assert_ne!(account_bucket("u1"), account_bucket("u2"));
    }

    #[test]
    fn reconcile_claims_only_matching_bucket() {
        let bucket = account_bucket("u1");
        let other = if bucket == 100 { 1 } else { bucket + 1 };
        let pool = vec![seed_task(1, bucket), seed_task(2, other), seed_task(3, bucket)];

        let merged = reconcile(&[], &pool, "u1");
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|t| t.belongs_to("u1")));
        assert!(merged.iter().all(|t| t.id <= SEED_ID_MAX));
    }

    #[test]
    fn reconcile_prefers_local_copy_on_id_collision() {
        let bucket = account_bucket("u1");
        let mut local_copy = seed_task(5, bucket);
        local_copy.completed = true;
        local_copy.title = "Edited locally".to_string();

        let pool = vec![seed_task(5, bucket)];
        let merged = reconcile(&[local_copy.clone()], &pool, "u1");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], local_copy);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let bucket = account_bucket("u1");
        let local = vec![Task::new_local(
            TaskDraft { title: "Mine".into(), ..TaskDraft::default() },
            "u1",
        )];
        let pool = vec![seed_task(7, bucket), seed_task(8, bucket)];

        let once = reconcile(&local, &pool, "u1");
        let twice = reconcile(&once, &pool, "u1");
        assert_eq!(once, twice);
    }

    #[test]
    fn reconcile_keeps_local_tasks_untouched() {
        let local = vec![Task::new_local(
            TaskDraft { title: "Buy milk".into(), ..TaskDraft::default() },
            "u1",
        )];
        let merged = reconcile(&local, &[], "u1");
        assert_eq!(merged, local);
    }
}
