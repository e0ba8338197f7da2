use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rh_client::WorkspaceStore;
use rh_core::entities::{Paper, PaperDraft, WorkspaceDraft, WorkspaceOverview};
use rh_core::{PaperId, WorkspaceId};
use rh_mirror::testing::FakeStore;
use rh_mirror::{
    MirrorError, NoticeLevel, Notifier, OptimisticController, WorkspaceCollection,
    WorkspacePapers, import_entities,
};

type Workspaces = OptimisticController<WorkspaceCollection<FakeStore>>;

async fn loaded(store: &Arc<FakeStore>) -> Workspaces {
    let controller =
        OptimisticController::new(WorkspaceCollection::new(Arc::clone(store)), Notifier::silent());
    controller.load().await.unwrap();
    controller
}

fn ids(list: &[&str]) -> Vec<WorkspaceId> {
    list.iter().map(|id| WorkspaceId::new(*id)).collect()
}

fn names(controller: &Workspaces) -> Vec<(String, String)> {
    controller
        .items()
        .into_iter()
        .map(|o: WorkspaceOverview| (o.workspace.id.into_inner(), o.workspace.name))
        .collect()
}

#[tokio::test]
async fn concrete_delete_scenario() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A"), ("2", "B")]));
    let (notifier, mut notices) = Notifier::channel();
    let controller =
        OptimisticController::new(WorkspaceCollection::new(Arc::clone(&store)), notifier);
    controller.load().await.unwrap();

    let first = controller.apply_delete(&WorkspaceId::new("1"));
    assert!(first.removed);
    // Applied before the remote call has run.
    assert_eq!(names(&controller), vec![("2".into(), "B".into())]);
    controller.settle().await;
    assert_eq!(names(&controller), vec![("2".into(), "B".into())]);

    let second = controller.apply_delete(&WorkspaceId::new("1"));
    assert!(!second.removed);
    controller.settle().await;
    assert_eq!(names(&controller), vec![("2".into(), "B".into())]);

    let received: Vec<_> = std::iter::from_fn(|| notices.try_recv().ok()).collect();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].level, NoticeLevel::Success);
    assert_eq!(
        store.calls().iter().filter(|c| c.starts_with("delete_workspace 1")).count(),
        2
    );
}

#[tokio::test]
async fn failed_delete_resyncs_to_remote_state() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A"), ("2", "B"), ("3", "C")]));
    store.fail_deletes_of("2");
    let controller = loaded(&store).await;

    controller.apply_delete(&WorkspaceId::new("1"));
    controller.apply_delete(&WorkspaceId::new("2"));
    assert_eq!(controller.ids(), ids(&["3"]));

    controller.settle().await;

    assert_eq!(controller.ids(), store.workspace_ids());
    assert_eq!(controller.ids(), ids(&["2", "3"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_deletes_settle_to_remote_state() {
    let ws: Vec<(String, String)> = (1..=8).map(|i| (i.to_string(), format!("W{i}"))).collect();
    let refs: Vec<(&str, &str)> = ws.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let store = Arc::new(FakeStore::with_workspaces(&refs));
    store.delay_deletes(Duration::from_millis(5));
    for failing in ["2", "5", "7"] {
        store.fail_deletes_of(failing);
    }
    let controller = loaded(&store).await;

    for id in ["1", "2", "3", "5", "6", "7", "3"] {
        controller.apply_delete(&WorkspaceId::new(id));
    }
    controller.settle().await;

    let mut mirrored = controller.ids();
    mirrored.sort();
    let mut remote = store.workspace_ids();
    remote.sort();
    assert_eq!(mirrored, remote);
    assert_eq!(remote, ids(&["2", "4", "5", "7", "8"]));
}

#[tokio::test]
async fn double_delete_never_surfaces_an_error() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A")]));
    store.delay_deletes(Duration::from_millis(2));
    let (notifier, mut notices) = Notifier::channel();
    let controller =
        OptimisticController::new(WorkspaceCollection::new(Arc::clone(&store)), notifier);
    controller.load().await.unwrap();

    controller.apply_delete(&WorkspaceId::new("1"));
    controller.apply_delete(&WorkspaceId::new("1"));
    controller.settle().await;

    assert!(controller.ids().is_empty());
    while let Ok(notice) = notices.try_recv() {
        assert_ne!(notice.level, NoticeLevel::Error);
    }
}

#[tokio::test]
async fn deleting_selected_entity_prunes_selection() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A"), ("2", "B")]));
    let controller = loaded(&store).await;
    controller.with_mirror_mut(|m| {
        m.select(&WorkspaceId::new("1"));
        m.select(&WorkspaceId::new("2"));
    });

    controller.apply_delete(&WorkspaceId::new("1"));

    let selected = controller.with_mirror(|m| m.selection().ids().to_vec());
    assert_eq!(selected, ids(&["2"]));
}

#[tokio::test]
async fn resync_prunes_selection_of_vanished_entities() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A"), ("2", "B")]));
    let controller = loaded(&store).await;
    controller.with_mirror_mut(|m| m.select(&WorkspaceId::new("1")));

    store.delete_workspace(&WorkspaceId::new("1")).await.unwrap();
    controller.resync().await.unwrap();

    assert!(controller.with_mirror(|m| m.selection().is_empty()));
}

#[tokio::test]
async fn create_appends_canonical_entity() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A")]));
    let controller = loaded(&store).await;

    let created = controller
        .apply_create(&WorkspaceDraft::new("Vision").with_tag_list("cv"))
        .await
        .unwrap();
    assert!(controller.ids().contains(&created.workspace.id));

    controller.settle().await;
    assert_eq!(controller.ids(), store.workspace_ids());
    assert_eq!(created.paper_count, 0);
}

#[tokio::test]
async fn failed_create_leaves_mirror_unchanged() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A")]));
    store.fail_creates();
    let (notifier, mut notices) = Notifier::channel();
    let controller =
        OptimisticController::new(WorkspaceCollection::new(Arc::clone(&store)), notifier);
    controller.load().await.unwrap();

    let err = controller
        .apply_create(&WorkspaceDraft::new("Vision"))
        .await
        .unwrap_err();

    assert!(matches!(err, MirrorError::Client(_)));
    assert_eq!(controller.ids(), ids(&["1"]));
    assert_eq!(notices.try_recv().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn blank_name_never_reaches_the_store() {
    let store = Arc::new(FakeStore::with_workspaces(&[]));
    let controller = loaded(&store).await;

    let err = controller
        .apply_create(&WorkspaceDraft::new("  "))
        .await
        .unwrap_err();

    assert!(matches!(err, MirrorError::Validation(_)));
    assert!(!store.calls().iter().any(|c| c.starts_with("create_workspace")));
}

#[tokio::test]
async fn paper_counts_tolerate_failed_fetches() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A"), ("2", "B")]));
    store.insert_paper("1", Paper::new("p1", "One"));
    store.insert_paper("1", Paper::new("p2", "Two"));
    store.insert_paper("2", Paper::new("p3", "Three"));
    store.fail_paper_list_of("2");

    let controller = loaded(&store).await;
    let overviews = controller.items();

    let counts: Vec<_> = overviews.iter().map(|o| o.paper_count).collect();
    assert_eq!(counts, vec![2, 0]);
    assert_eq!(WorkspaceOverview::total_papers(&overviews), 2);
}

#[tokio::test]
async fn detached_view_is_not_touched_by_late_resync() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A"), ("2", "B")]));
    store.fail_deletes_of("1");
    store.delay_deletes(Duration::from_millis(5));
    let controller = loaded(&store).await;

    controller.apply_delete(&WorkspaceId::new("1"));
    controller.detach_all();
    controller.settle().await;

    // The failed delete would have restored "1"; the torn-down view keeps
    // its last state instead.
    assert_eq!(controller.ids(), ids(&["2"]));
    assert_eq!(store.workspace_ids(), ids(&["1", "2"]));
}

#[tokio::test]
async fn removing_a_paper_is_optimistic_too() {
    let store = Arc::new(FakeStore::with_workspaces(&[("1", "A")]));
    store.insert_paper("1", Paper::new("p1", "One"));
    store.insert_paper("1", Paper::new("p2", "Two"));
    store.fail_deletes_of("p2");
    let papers = OptimisticController::new(
        WorkspacePapers::new(Arc::clone(&store), WorkspaceId::new("1")),
        Notifier::silent(),
    );
    papers.load().await.unwrap();
    papers.with_mirror_mut(|m| m.select(&PaperId::new("p1")));

    papers.apply_delete(&PaperId::new("p1"));
    papers.apply_delete(&PaperId::new("p2"));
    assert!(papers.ids().is_empty());
    assert!(papers.selected().is_empty());

    papers.settle().await;
    assert_eq!(papers.ids(), store.paper_ids("1"));
    assert_eq!(papers.ids(), vec![PaperId::new("p2")]);
}

fn drafts(n: usize) -> Vec<PaperDraft> {
    (1..=n)
        .map(|i| PaperDraft::from_paper(&Paper::new(format!("p{i}"), format!("Paper {i}"))))
        .collect()
}

#[tokio::test]
async fn import_stops_at_first_failure() {
    let store = FakeStore::with_workspaces(&[("1", "A")]);
    store.fail_add_call(2);

    let report = import_entities(&store, &WorkspaceId::new("1"), &drafts(3)).await;

    assert_eq!(report.imported_count(), 1);
    assert_eq!(report.skipped, 1);
    assert!(report.summary().starts_with("1 imported"));
    assert_eq!(report.notice().level, NoticeLevel::Error);
    assert_eq!(store.paper_ids("1"), vec![PaperId::new("p1")]);
    assert_eq!(
        store.calls().iter().filter(|c| c.starts_with("add_paper")).count(),
        2
    );
}

#[tokio::test]
async fn import_preserves_order() {
    let store = FakeStore::with_workspaces(&[("1", "A")]);

    let report = import_entities(&store, &WorkspaceId::new("1"), &drafts(3)).await;

    assert!(report.is_complete());
    assert_eq!(report.summary(), "3 imported");
    assert_eq!(
        store.paper_ids("1"),
        vec![PaperId::new("p1"), PaperId::new("p2"), PaperId::new("p3")]
    );
}
