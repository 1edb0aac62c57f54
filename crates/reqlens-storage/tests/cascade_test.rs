//! Project deletion cascades and the events it emits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use reqlens_core::events::{
    EventDispatcher, ProjectDeletedEvent, ReqEventHandler, RequirementChangedEvent,
};
use reqlens_core::model::{NewMilestone, NewProject, NewRequirement, NewStakeholder};
use reqlens_storage::ReqStorageEngine;
use serde_json::json;

#[derive(Default)]
struct Recorder {
    deleted: Mutex<Vec<ProjectDeletedEvent>>,
    created_requirements: AtomicUsize,
}

impl ReqEventHandler for Recorder {
    fn on_project_deleted(&self, event: &ProjectDeletedEvent) {
        self.deleted.lock().unwrap().push(event.clone());
    }

    fn on_requirement_created(&self, _event: &RequirementChangedEvent) {
        self.created_requirements.fetch_add(1, Ordering::SeqCst);
    }
}

fn seeded() -> (ReqStorageEngine, Arc<Recorder>, i64, i64) {
    let recorder = Arc::new(Recorder::default());
    let mut events = EventDispatcher::new();
    events.register(recorder.clone());
    let engine = ReqStorageEngine::open_in_memory().unwrap().with_events(events);

    let mut ids = Vec::new();
    for name in ["Doomed", "Survivor"] {
        let new: NewProject = serde_json::from_value(json!({ "name": name })).unwrap();
        ids.push(engine.create_project(&new).unwrap().id);
    }
    let (doomed, survivor) = (ids[0], ids[1]);

    for n in 0..2 {
        let s: NewStakeholder = serde_json::from_value(json!({ "name": format!("s{n}") })).unwrap();
        engine.create_stakeholder(doomed, s).unwrap();
    }
    for n in 0..3 {
        let r: NewRequirement =
            serde_json::from_value(json!({ "title": format!("r{n}") })).unwrap();
        engine.create_requirement(doomed, r).unwrap();
    }
    let m: NewMilestone = serde_json::from_value(json!({ "title": "m" })).unwrap();
    engine.create_milestone(doomed, m).unwrap();

    (engine, recorder, doomed, survivor)
}

#[test]
fn delete_removes_children_and_reports_counts() {
    let (engine, recorder, doomed, survivor) = seeded();
    let counts = engine.delete_project(doomed).unwrap();
    assert_eq!(counts.stakeholders, 2);
    assert_eq!(counts.requirements, 3);
    assert_eq!(counts.milestones, 1);

    assert!(engine.get_project(doomed).is_err());
    assert!(engine.get_project(survivor).is_ok());
    let remaining = engine.db().with_reader(|conn| {
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM requirements", [], |row| row.get(0))
            .map_err(reqlens_core::StorageError::sqlite)?;
        Ok(n)
    });
    assert_eq!(remaining.unwrap(), 0);

    let deleted = recorder.deleted.lock().unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].name, "Doomed");
    assert_eq!(deleted[0].requirements_removed, 3);
    assert_eq!(recorder.created_requirements.load(Ordering::SeqCst), 3);
}

#[test]
fn foreign_assignments_to_deleted_milestones_are_cleared() {
    let (engine, _recorder, doomed, survivor) = seeded();
    let milestone = engine.list_milestones(doomed).unwrap().remove(0);
    let r: NewRequirement = serde_json::from_value(json!({ "title": "elsewhere" })).unwrap();
    let rid = engine.create_requirement(survivor, r).unwrap().id;
    engine.assign_milestone(rid, Some(milestone.id)).unwrap();

    engine.delete_project(doomed).unwrap();
    assert_eq!(engine.get_requirement(rid).unwrap().assigned_milestone_id, None);
}

#[test]
fn deleting_unknown_project_changes_nothing() {
    let (engine, recorder, doomed, _) = seeded();
    assert!(engine.delete_project(999).is_err());
    assert_eq!(engine.project_detail(doomed).unwrap().requirement_count, 3);
    assert!(recorder.deleted.lock().unwrap().is_empty());
}
