//! Diagnosis over requirements whose project is gone, and the repair.

use chrono::Utc;
use reqlens_core::model::{NewProject, NewRequirement, Requirement};
use reqlens_storage::queries::requirements;
use reqlens_storage::ReqStorageEngine;
use serde_json::json;

fn insert_raw(engine: &ReqStorageEngine, project_id: i64, title: &str) -> i64 {
    let mut r = Requirement::new(project_id, title);
    r.updated_at = Utc::now();
    engine
        .db()
        .with_writer(|conn| requirements::insert_requirement(conn, &r))
        .unwrap()
}

#[test]
fn diagnose_is_read_only_and_repair_moves_matching_orphans() {
    let engine = ReqStorageEngine::open_in_memory().unwrap();
    let mut pids = Vec::new();
    for name in ["Billing", "Shipping"] {
        let new: NewProject = serde_json::from_value(json!({ "name": name })).unwrap();
        pids.push(engine.create_project(&new).unwrap().id);
    }
    let (billing, shipping) = (pids[0], pids[1]);

    let r: NewRequirement = serde_json::from_value(json!({ "title": "invoice pdf" })).unwrap();
    engine.create_requirement(billing, r).unwrap();
    let r: NewRequirement = serde_json::from_value(json!({ "title": "Billing address" })).unwrap();
    let misplaced = engine.create_requirement(shipping, r).unwrap().id;

    let matching_orphan = insert_raw(&engine, 0, "Billing retries");
    let dangling_orphan = insert_raw(&engine, 77, "unrelated");

    let d = engine.diagnose(billing).unwrap();
    assert_eq!(d.total_requirements, 4);
    assert_eq!(d.correct_requirements_count, 1);
    assert_eq!(d.orphaned_requirements_count, 2);
    assert_eq!(d.incorrect_requirements_count, 1);
    assert_eq!(d.potential_requirements_count, 2);
    assert_eq!(engine.get_requirement(matching_orphan).unwrap().project_id, 0);

    let outcome = engine.repair_requirements(billing).unwrap();
    assert_eq!(outcome.repaired_ids, vec![matching_orphan]);
    assert_eq!(engine.get_requirement(matching_orphan).unwrap().project_id, billing);
    assert_eq!(engine.get_requirement(dangling_orphan).unwrap().project_id, 77);
    assert_eq!(engine.get_requirement(misplaced).unwrap().project_id, shipping);

    let again = engine.repair_requirements(billing).unwrap();
    assert!(again.repaired_ids.is_empty());
}

#[test]
fn diagnosing_unknown_project_fails() {
    let engine = ReqStorageEngine::open_in_memory().unwrap();
    assert!(engine.diagnose(5).is_err());
}
