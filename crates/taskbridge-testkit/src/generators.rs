//! Proptest generators for property-based testing.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use taskbridge_core::{EntityId, SyncState, Task, TaskList, TaskStatus};

/// Generate a short entity id.
pub fn entity_id() -> impl Strategy<Value = EntityId> {
    "[a-z][a-z0-9]{0,6}".prop_map(EntityId::from)
}

/// Generate a short printable title.
pub fn title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,14}".prop_map(String::from)
}

/// Generate a task status.
pub fn task_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![Just(TaskStatus::NeedsAction), Just(TaskStatus::Completed)]
}

/// Generate a timestamp within a few years of the epoch base, at an
/// arbitrary hour so calendar-day comparison gets exercised.
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..1500, 0i64..24).prop_map(|(days, hours)| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + Duration::days(days)
            + Duration::hours(hours)
    })
}

/// Generate an optional due date.
pub fn due() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    proptest::option::of(timestamp())
}

/// Generate a task list with a random id.
pub fn task_list() -> impl Strategy<Value = TaskList> {
    (entity_id(), title()).prop_map(|(id, title)| TaskList {
        id,
        title,
        self_link: None,
    })
}

/// Generate a snapshot whose tasks all reference generated lists, with
/// ids unique per collection.
pub fn sync_state() -> impl Strategy<Value = SyncState> {
    prop::collection::hash_map("[a-z][a-z0-9]{0,6}", title(), 0..5).prop_flat_map(|lists_by_id| {
        let tasklists: Vec<TaskList> = lists_by_id
            .into_iter()
            .map(|(id, title)| TaskList::new(id, title))
            .collect();
        let list_ids: Vec<EntityId> = tasklists.iter().map(|l| l.id.clone()).collect();

        let tasks = if list_ids.is_empty() {
            Just(Vec::<Task>::new()).boxed()
        } else {
            prop::collection::hash_map(
                "[a-z][a-z0-9]{0,6}",
                (title(), task_status(), due(), 0..list_ids.len()),
                0..8,
            )
            .prop_map(move |tasks_by_id| {
                tasks_by_id
                    .into_iter()
                    .map(|(id, (title, status, due, list_ix))| Task {
                        id: EntityId::from(id),
                        title,
                        self_link: None,
                        status,
                        due,
                        completed: None,
                        task_list_id: list_ids[list_ix].clone(),
                    })
                    .collect()
            })
            .boxed()
        };

        (Just(tasklists), tasks)
    })
    .prop_map(|(tasklists, tasks)| SyncState { tasklists, tasks })
}
