//! V002: project creator and the requirement analysis columns
//! (VSM, KANO, SMART, WFMT and research notes).

pub const MIGRATION_SQL: &str = r#"
ALTER TABLE projects ADD COLUMN creator TEXT;
CREATE INDEX IF NOT EXISTS idx_projects_creator ON projects(creator);

ALTER TABLE requirements ADD COLUMN vsm_process_steps TEXT;
ALTER TABLE requirements ADD COLUMN cycle_time REAL;
ALTER TABLE requirements ADD COLUMN lead_time REAL;
ALTER TABLE requirements ADD COLUMN process_efficiency REAL;
ALTER TABLE requirements ADD COLUMN vsm_current_state TEXT;
ALTER TABLE requirements ADD COLUMN vsm_future_state TEXT;

ALTER TABLE requirements ADD COLUMN kano_category TEXT;
ALTER TABLE requirements ADD COLUMN kano_survey_data TEXT;
ALTER TABLE requirements ADD COLUMN kano_priority_score REAL;
ALTER TABLE requirements ADD COLUMN kano_positive_answer TEXT;
ALTER TABLE requirements ADD COLUMN kano_negative_answer TEXT;

ALTER TABLE requirements ADD COLUMN smart_specific TEXT;
ALTER TABLE requirements ADD COLUMN smart_measurable TEXT;
ALTER TABLE requirements ADD COLUMN smart_achievable INTEGER;
ALTER TABLE requirements ADD COLUMN smart_relevant TEXT;
ALTER TABLE requirements ADD COLUMN smart_timebound TEXT;
ALTER TABLE requirements ADD COLUMN smart_target_level TEXT;

ALTER TABLE requirements ADD COLUMN wfmt_analysis TEXT;
ALTER TABLE requirements ADD COLUMN standard_time REAL;
ALTER TABLE requirements ADD COLUMN improvement_potential REAL;
ALTER TABLE requirements ADD COLUMN wfmt_tmu_total REAL;
ALTER TABLE requirements ADD COLUMN wfmt_allowance_rate REAL;

ALTER TABLE requirements ADD COLUMN user_research_data TEXT;
ALTER TABLE requirements ADD COLUMN user_feedback TEXT;
ALTER TABLE requirements ADD COLUMN user_satisfaction INTEGER;
ALTER TABLE requirements ADD COLUMN target_user_group TEXT;
ALTER TABLE requirements ADD COLUMN competitor_analysis TEXT;
ALTER TABLE requirements ADD COLUMN competitor_products TEXT;
ALTER TABLE requirements ADD COLUMN competitive_advantage TEXT;
ALTER TABLE requirements ADD COLUMN market_research TEXT;
ALTER TABLE requirements ADD COLUMN market_size TEXT;
ALTER TABLE requirements ADD COLUMN market_trends TEXT;
ALTER TABLE requirements ADD COLUMN current_state_analysis TEXT;
ALTER TABLE requirements ADD COLUMN product_lifecycle_stage TEXT;
ALTER TABLE requirements ADD COLUMN technical_constraints TEXT;
ALTER TABLE requirements ADD COLUMN resource_constraints TEXT;
ALTER TABLE requirements ADD COLUMN short_term_plan TEXT;
ALTER TABLE requirements ADD COLUMN medium_term_plan TEXT;
ALTER TABLE requirements ADD COLUMN long_term_plan TEXT;
ALTER TABLE requirements ADD COLUMN strategic_alignment TEXT;
ALTER TABLE requirements ADD COLUMN risk_assessment TEXT;
ALTER TABLE requirements ADD COLUMN technical_risks TEXT;
ALTER TABLE requirements ADD COLUMN business_risks TEXT;
ALTER TABLE requirements ADD COLUMN implementation_risks TEXT;
ALTER TABLE requirements ADD COLUMN development_cost_estimate INTEGER;
ALTER TABLE requirements ADD COLUMN operational_cost_estimate INTEGER;
ALTER TABLE requirements ADD COLUMN expected_revenue INTEGER;
ALTER TABLE requirements ADD COLUMN cost_benefit_analysis TEXT;
ALTER TABLE requirements ADD COLUMN implementation_priority TEXT;
ALTER TABLE requirements ADD COLUMN dependencies TEXT;
ALTER TABLE requirements ADD COLUMN alternative_solutions TEXT;
ALTER TABLE requirements ADD COLUMN success_metrics TEXT;

CREATE INDEX IF NOT EXISTS idx_requirements_kano ON requirements(kano_category);
"#;
