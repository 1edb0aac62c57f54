//! V001: Initial schema.
//! projects, stakeholders, milestones, requirements (template, classification
//! and value-assessment columns).

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

-- Influence and interest are 1-5 scores; requirements is free text.
CREATE TABLE IF NOT EXISTS stakeholders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(id),
    name TEXT NOT NULL,
    role TEXT,
    influence INTEGER NOT NULL DEFAULT 3,
    interest INTEGER NOT NULL DEFAULT 3,
    requirements TEXT,
    contact_info TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_stakeholders_project ON stakeholders(project_id);

-- requirements holds a comma-joined list of requirement ids.
CREATE TABLE IF NOT EXISTS milestones (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(id),
    title TEXT NOT NULL,
    description TEXT,
    deadline TEXT,
    status TEXT NOT NULL DEFAULT 'planned',
    requirements TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_milestones_project ON milestones(project_id);

-- project_id carries no foreign key: rows whose project vanished are
-- detected and reattached by the diagnosis endpoints.
CREATE TABLE IF NOT EXISTS requirements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    requirement_type TEXT NOT NULL DEFAULT '',
    scenario TEXT NOT NULL DEFAULT '',
    problem TEXT NOT NULL DEFAULT '',
    current_solution TEXT NOT NULL DEFAULT '',
    goal TEXT NOT NULL DEFAULT '',
    expected_solution TEXT NOT NULL DEFAULT '',
    value TEXT NOT NULL DEFAULT '',
    priority_level TEXT NOT NULL DEFAULT 'medium',
    other_info TEXT NOT NULL DEFAULT '',
    source TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL DEFAULT 'functional',
    priority TEXT NOT NULL DEFAULT 'medium',
    status TEXT NOT NULL DEFAULT 'collected',
    acceptance_criteria TEXT NOT NULL DEFAULT '',

    estimated_business_value INTEGER NOT NULL DEFAULT 5,
    estimated_user_value INTEGER NOT NULL DEFAULT 5,
    estimated_technical_value INTEGER NOT NULL DEFAULT 5,
    estimated_effort INTEGER NOT NULL DEFAULT 5,
    estimated_roi REAL NOT NULL DEFAULT 0,
    actual_business_value INTEGER NOT NULL DEFAULT 0,
    actual_user_value INTEGER NOT NULL DEFAULT 0,
    actual_technical_value INTEGER NOT NULL DEFAULT 0,
    actual_effort INTEGER NOT NULL DEFAULT 0,
    actual_roi REAL NOT NULL DEFAULT 0,
    value_assessor TEXT,
    value_assessment_date TEXT,
    actual_value_assessor TEXT,
    actual_value_assessment_date TEXT,

    expected_completion_date TEXT,
    assigned_milestone_id INTEGER,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_requirements_project ON requirements(project_id);
CREATE INDEX IF NOT EXISTS idx_requirements_milestone
    ON requirements(assigned_milestone_id) WHERE assigned_milestone_id IS NOT NULL;
"#;
