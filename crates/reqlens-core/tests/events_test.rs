//! Tests for the domain event system.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use reqlens_core::events::dispatcher::EventDispatcher;
use reqlens_core::events::handler::ReqEventHandler;
use reqlens_core::events::types::*;
use reqlens_core::events::TracingEventHandler;

/// A test handler that counts events.
#[derive(Default)]
struct CountingHandler {
    projects_created: AtomicUsize,
    requirements_deleted: AtomicUsize,
    assignments: AtomicUsize,
    errors: AtomicUsize,
}

impl ReqEventHandler for CountingHandler {
    fn on_project_created(&self, _event: &ProjectCreatedEvent) {
        self.projects_created.fetch_add(1, Ordering::Relaxed);
    }

    fn on_requirement_deleted(&self, _event: &RequirementChangedEvent) {
        self.requirements_deleted.fetch_add(1, Ordering::Relaxed);
    }

    fn on_milestone_assigned(&self, _event: &MilestoneAssignedEvent) {
        self.assignments.fetch_add(1, Ordering::Relaxed);
    }

    fn on_error(&self, _event: &ErrorEvent) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

fn project_created() -> ProjectCreatedEvent {
    ProjectCreatedEvent {
        project_id: 1,
        name: "Portal".into(),
    }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl ReqEventHandler for NoopHandler {}

    let handler = NoopHandler;
    handler.on_project_created(&project_created());
    handler.on_diagnosis_run(&DiagnosisRunEvent {
        project_id: 1,
        correct: 3,
        orphaned: 1,
        incorrect: 0,
        repaired: 0,
    });
    handler.on_error(&ErrorEvent {
        message: "test".into(),
        error_code: "TEST".into(),
    });
}

#[test]
fn test_dispatcher_zero_handlers() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_project_created(&project_created());
}

#[test]
fn test_dispatcher_multiple_handlers() {
    let mut dispatcher = EventDispatcher::new();
    let handler1 = Arc::new(CountingHandler::default());
    let handler2 = Arc::new(CountingHandler::default());
    dispatcher.register(handler1.clone());
    dispatcher.register(handler2.clone());
    assert_eq!(dispatcher.handler_count(), 2);

    dispatcher.emit_project_created(&project_created());
    dispatcher.emit_milestone_assigned(&MilestoneAssignedEvent {
        requirement_id: 4,
        milestone_id: None,
    });

    for h in [&handler1, &handler2] {
        assert_eq!(h.projects_created.load(Ordering::Relaxed), 1);
        assert_eq!(h.assignments.load(Ordering::Relaxed), 1);
        assert_eq!(h.requirements_deleted.load(Ordering::Relaxed), 0);
    }
}

#[test]
fn test_panicking_handler_does_not_stop_dispatch() {
    struct PanickingHandler;
    impl ReqEventHandler for PanickingHandler {
        fn on_requirement_deleted(&self, _event: &RequirementChangedEvent) {
            panic!("intentional panic in handler");
        }
    }

    let mut dispatcher = EventDispatcher::new();
    let counting = Arc::new(CountingHandler::default());
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counting.clone());

    dispatcher.emit_requirement_deleted(&RequirementChangedEvent {
        project_id: 1,
        requirement_id: 2,
        title: "t".into(),
    });

    assert_eq!(counting.requirements_deleted.load(Ordering::Relaxed), 1);
}

#[test]
fn test_event_payload_integrity() {
    #[derive(Default)]
    struct CapturingHandler {
        requirements_removed: AtomicUsize,
        project_id: AtomicI64,
    }

    impl ReqEventHandler for CapturingHandler {
        fn on_project_deleted(&self, event: &ProjectDeletedEvent) {
            self.requirements_removed
                .store(event.requirements_removed, Ordering::Relaxed);
            self.project_id.store(event.project_id, Ordering::Relaxed);
        }
    }

    let mut dispatcher = EventDispatcher::new();
    let handler = Arc::new(CapturingHandler::default());
    dispatcher.register(handler.clone());

    dispatcher.emit_project_deleted(&ProjectDeletedEvent {
        project_id: 12,
        name: "Legacy".into(),
        stakeholders_removed: 1,
        requirements_removed: 42,
        milestones_removed: 3,
    });

    assert_eq!(handler.requirements_removed.load(Ordering::Relaxed), 42);
    assert_eq!(handler.project_id.load(Ordering::Relaxed), 12);
}

#[test]
fn test_tracing_handler_accepts_every_event() {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(TracingEventHandler));

    dispatcher.emit_project_created(&project_created());
    dispatcher.emit_actual_assessment_recorded(&ActualAssessmentRecordedEvent {
        requirement_id: 1,
        assessor: Some("lin".into()),
        actual_roi: 4.5,
    });
    dispatcher.emit_diagnosis_run(&DiagnosisRunEvent {
        project_id: 1,
        correct: 0,
        orphaned: 2,
        incorrect: 0,
        repaired: 2,
    });
    dispatcher.emit_error(&ErrorEvent {
        message: "disk full".into(),
        error_code: "STORAGE_ERROR".into(),
    });
}

#[test]
fn test_dispatcher_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EventDispatcher>();
}
