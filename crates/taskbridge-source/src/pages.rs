//! Document-database source: typed pages with an adapter-owned id mapping.
//!
//! The document side stores entities as pages keyed by its own page ids.
//! This adapter owns the page-id ↔ entity-id mapping and the conversion
//! between typed page records and the canonical model; neither page ids
//! nor property bags ever cross into the core. Deleting means archiving,
//! so archived pages stay in the store but drop out of fetched snapshots.
//!
//! The implementation here is an in-memory emulation of such a service,
//! faithful enough to exercise the whole push surface in tests.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskbridge_core::{EntityId, SyncState, Task, TaskList, TaskStatus};

use crate::error::{Result, SourceError};
use crate::traits::SourceClient;

/// A document-database page identifier.
///
/// Minted by the document side; distinct from canonical [`EntityId`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId(String);

impl PageId {
    /// Get the raw page id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A page representing a task list.
#[derive(Debug, Clone)]
pub struct ListPage {
    /// The page's own id, minted by the document side.
    pub page_id: PageId,
    /// Canonical id of the list this page mirrors.
    pub external_id: EntityId,
    /// Page title.
    pub title: String,
    /// Link back to the list in the task service.
    pub url: Option<String>,
    /// Archived pages are retained but invisible to fetches.
    pub archived: bool,
}

/// A page representing a task, related to its list's page.
#[derive(Debug, Clone)]
pub struct TaskPage {
    /// The page's own id, minted by the document side.
    pub page_id: PageId,
    /// Canonical id of the task this page mirrors.
    pub external_id: EntityId,
    /// Page title.
    pub title: String,
    /// Completion checkbox.
    pub done: bool,
    /// Due date property.
    pub due: Option<DateTime<Utc>>,
    /// Completion date property.
    pub completed_at: Option<DateTime<Utc>>,
    /// Link back to the task in the task service.
    pub url: Option<String>,
    /// Relation to the owning list's page.
    pub project: PageId,
    /// Archived pages are retained but invisible to fetches.
    pub archived: bool,
}

impl ListPage {
    fn to_list(&self) -> TaskList {
        TaskList {
            id: self.external_id.clone(),
            title: self.title.clone(),
            self_link: self.url.clone(),
        }
    }

    fn write_from(&mut self, list: &TaskList) {
        self.title = list.title.clone();
        self.url = list.self_link.clone();
    }
}

impl TaskPage {
    fn to_task(&self, list_id: EntityId) -> Task {
        Task {
            id: self.external_id.clone(),
            title: self.title.clone(),
            self_link: self.url.clone(),
            status: if self.done {
                TaskStatus::Completed
            } else {
                TaskStatus::NeedsAction
            },
            due: self.due,
            completed: self.completed_at,
            task_list_id: list_id,
        }
    }

    fn write_from(&mut self, task: &Task, project: PageId) {
        self.title = task.title.clone();
        self.done = task.status.is_completed();
        self.due = task.due;
        self.completed_at = task.completed;
        self.url = task.self_link.clone();
        self.project = project;
    }
}

struct DocumentInner {
    list_pages: Vec<ListPage>,
    task_pages: Vec<TaskPage>,
    next_page: u64,
}

impl DocumentInner {
    fn mint_page_id(&mut self) -> PageId {
        self.next_page += 1;
        PageId(format!("page-{:04}", self.next_page))
    }

    fn list_page(&self, id: &EntityId) -> Option<&ListPage> {
        self.list_pages
            .iter()
            .find(|p| !p.archived && &p.external_id == id)
    }

    fn list_page_mut(&mut self, id: &EntityId) -> Option<&mut ListPage> {
        self.list_pages
            .iter_mut()
            .find(|p| !p.archived && &p.external_id == id)
    }

    fn task_page_mut(&mut self, id: &EntityId) -> Option<&mut TaskPage> {
        self.task_pages
            .iter_mut()
            .find(|p| !p.archived && &p.external_id == id)
    }
}

/// In-memory document-database source.
///
/// Implements [`SourceClient`] over typed pages, maintaining the page-id
/// mapping the way a real document-database adapter would.
pub struct DocumentSource {
    name: String,
    inner: RwLock<DocumentInner>,
    fail_fetch: AtomicBool,
    poisoned: RwLock<HashSet<EntityId>>,
}

impl DocumentSource {
    /// Create an empty document source with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: RwLock::new(DocumentInner {
                list_pages: Vec::new(),
                task_pages: Vec::new(),
                next_page: 0,
            }),
            fail_fetch: AtomicBool::new(false),
            poisoned: RwLock::new(HashSet::new()),
        }
    }

    /// Page id backing a list, if the list has a live page.
    pub fn page_for_list(&self, id: &EntityId) -> Option<PageId> {
        let inner = self.inner.read().unwrap();
        inner.list_page(id).map(|p| p.page_id.clone())
    }

    /// Page id backing a task, if the task has a live page.
    pub fn page_for_task(&self, id: &EntityId) -> Option<PageId> {
        let inner = self.inner.read().unwrap();
        inner
            .task_pages
            .iter()
            .find(|p| !p.archived && &p.external_id == id)
            .map(|p| p.page_id.clone())
    }

    /// Number of pages in the store, archived ones included.
    pub fn page_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.list_pages.len() + inner.task_pages.len()
    }

    /// Make the next and all following fetches fail until cleared.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make every push operation touching `id` fail until cleared.
    pub fn poison(&self, id: impl Into<EntityId>) {
        self.poisoned.write().unwrap().insert(id.into());
    }

    fn check_poisoned(&self, id: &EntityId) -> Result<()> {
        if self.poisoned.read().unwrap().contains(id) {
            return Err(SourceError::Unavailable(format!(
                "injected failure for {id}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceClient for DocumentSource {
    fn name(&self) -> &str {
        &self.name
    }

    /// Materialize a canonical snapshot from the live pages.
    ///
    /// A task page whose project relation points at a missing or archived
    /// list page cannot be mapped to a canonical task; the whole fetch
    /// fails rather than returning a partial snapshot.
    async fn fetch_snapshot(&self) -> Result<SyncState> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable(format!(
                "injected fetch failure for {}",
                self.name
            )));
        }

        let inner = self.inner.read().unwrap();
        let mut state = SyncState::new();

        for page in inner.list_pages.iter().filter(|p| !p.archived) {
            state.tasklists.push(page.to_list());
        }

        for page in inner.task_pages.iter().filter(|p| !p.archived) {
            let list = inner
                .list_pages
                .iter()
                .find(|lp| !lp.archived && lp.page_id == page.project)
                .ok_or_else(|| {
                    SourceError::Malformed(format!(
                        "task page {} relates to unknown project page {}",
                        page.page_id, page.project
                    ))
                })?;
            state.tasks.push(page.to_task(list.external_id.clone()));
        }

        Ok(state)
    }

    async fn insert_list(&self, list: &TaskList) -> Result<()> {
        self.check_poisoned(&list.id)?;
        let mut inner = self.inner.write().unwrap();
        // A second insert for a known id rewrites the existing page.
        if let Some(page) = inner.list_page_mut(&list.id) {
            page.write_from(list);
            return Ok(());
        }
        let page_id = inner.mint_page_id();
        tracing::debug!("{}: new list page {} for {}", self.name, page_id, list.id);
        inner.list_pages.push(ListPage {
            page_id,
            external_id: list.id.clone(),
            title: list.title.clone(),
            url: list.self_link.clone(),
            archived: false,
        });
        Ok(())
    }

    async fn update_list(&self, list: &TaskList) -> Result<()> {
        self.check_poisoned(&list.id)?;
        let mut inner = self.inner.write().unwrap();
        match inner.list_page_mut(&list.id) {
            Some(page) => {
                page.write_from(list);
                Ok(())
            }
            None => Err(SourceError::NotFound {
                kind: "list page",
                id: list.id.to_string(),
            }),
        }
    }

    async fn delete_list(&self, id: &EntityId) -> Result<()> {
        self.check_poisoned(id)?;
        let mut inner = self.inner.write().unwrap();
        match inner.list_page_mut(id) {
            Some(page) => {
                page.archived = true;
                tracing::debug!("archived list page {}", page.page_id);
                Ok(())
            }
            None => Err(SourceError::NotFound {
                kind: "list page",
                id: id.to_string(),
            }),
        }
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        self.check_poisoned(&task.id)?;
        let mut inner = self.inner.write().unwrap();
        let project = inner
            .list_page(&task.task_list_id)
            .map(|p| p.page_id.clone())
            .ok_or_else(|| SourceError::NotFound {
                kind: "project page",
                id: task.task_list_id.to_string(),
            })?;
        if let Some(page) = inner.task_page_mut(&task.id) {
            page.write_from(task, project);
            return Ok(());
        }
        let page_id = inner.mint_page_id();
        tracing::debug!("{}: new task page {} for {}", self.name, page_id, task.id);
        inner.task_pages.push(TaskPage {
            page_id,
            external_id: task.id.clone(),
            title: task.title.clone(),
            done: task.status.is_completed(),
            due: task.due,
            completed_at: task.completed,
            url: task.self_link.clone(),
            project,
            archived: false,
        });
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        self.check_poisoned(&task.id)?;
        let mut inner = self.inner.write().unwrap();
        let project = inner
            .list_page(&task.task_list_id)
            .map(|p| p.page_id.clone())
            .ok_or_else(|| SourceError::NotFound {
                kind: "project page",
                id: task.task_list_id.to_string(),
            })?;
        match inner.task_page_mut(&task.id) {
            Some(page) => {
                page.write_from(task, project);
                Ok(())
            }
            None => Err(SourceError::NotFound {
                kind: "task page",
                id: task.id.to_string(),
            }),
        }
    }

    async fn delete_task(&self, task: &Task) -> Result<()> {
        self.check_poisoned(&task.id)?;
        let mut inner = self.inner.write().unwrap();
        match inner.task_page_mut(&task.id) {
            Some(page) => {
                page.archived = true;
                tracing::debug!("archived task page {}", page.page_id);
                Ok(())
            }
            None => Err(SourceError::NotFound {
                kind: "task page",
                id: task.id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> DocumentSource {
        let source = DocumentSource::new("doc-db");
        source
            .insert_list(&TaskList::new("l1", "Groceries"))
            .await
            .unwrap();
        source
            .insert_task(&Task::new("t1", "Buy milk", "l1"))
            .await
            .unwrap();
        source
    }

    #[tokio::test]
    async fn test_fetch_maps_pages_to_canonical_shapes() {
        let source = seeded().await;
        let snap = source.fetch_snapshot().await.unwrap();

        assert_eq!(snap.tasklists.len(), 1);
        assert_eq!(snap.tasks.len(), 1);
        let task = &snap.tasks[0];
        assert_eq!(task.id, EntityId::from("t1"));
        assert_eq!(task.task_list_id, EntityId::from("l1"));
        assert_eq!(task.status, TaskStatus::NeedsAction);
    }

    #[tokio::test]
    async fn test_page_mapping_is_adapter_owned() {
        let source = seeded().await;
        let list_page = source.page_for_list(&EntityId::from("l1")).unwrap();
        let task_page = source.page_for_task(&EntityId::from("t1")).unwrap();
        assert_ne!(list_page, task_page);

        // Canonical snapshots carry no page ids.
        let snap = source.fetch_snapshot().await.unwrap();
        assert_eq!(snap.tasklists[0].id.as_str(), "l1");
    }

    #[tokio::test]
    async fn test_delete_archives_instead_of_dropping() {
        let source = seeded().await;
        source
            .delete_task(&Task::new("t1", "Buy milk", "l1"))
            .await
            .unwrap();

        let snap = source.fetch_snapshot().await.unwrap();
        assert!(snap.tasks.is_empty());
        // The page itself is retained.
        assert_eq!(source.page_count(), 2);
        assert!(source.page_for_task(&EntityId::from("t1")).is_none());
    }

    #[tokio::test]
    async fn test_insert_task_without_project_page_fails() {
        let source = DocumentSource::new("doc-db");
        let err = source
            .insert_task(&Task::new("t1", "Buy milk", "l-missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_task_rehomes_the_project_relation() {
        let source = seeded().await;
        source
            .insert_list(&TaskList::new("l2", "Errands"))
            .await
            .unwrap();

        let mut moved = Task::new("t1", "Buy milk", "l2");
        moved.status = TaskStatus::Completed;
        source.update_task(&moved).await.unwrap();

        let snap = source.fetch_snapshot().await.unwrap();
        assert_eq!(snap.tasks[0].task_list_id, EntityId::from("l2"));
        assert_eq!(snap.tasks[0].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_fetch_fails_atomically_on_dangling_relation() {
        let source = seeded().await;
        // Archive the list page out from under the task page.
        source.delete_list(&EntityId::from("l1")).await.unwrap();

        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }
}
