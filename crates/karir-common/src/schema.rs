/// Core table definitions for the `karir` schema.
///
/// `ahp_judgments` stores only one orientation per criterion pair; the
/// mirrored reciprocal is derived at computation time. `ahp_weights` is
/// replaced wholesale on every recompute and `pm_results` holds one row per
/// job.
pub const CORE_TABLES_DDL: &str = r#"
CREATE SCHEMA IF NOT EXISTS karir;

CREATE TABLE IF NOT EXISTS karir.jobs (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    average_salary DOUBLE PRECISION,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS karir.criteria (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS karir.sub_criteria (
    id BIGSERIAL PRIMARY KEY,
    criterion_id BIGINT NOT NULL REFERENCES karir.criteria(id),
    name TEXT NOT NULL,
    code VARCHAR(16) NOT NULL,
    UNIQUE (criterion_id, name)
);

CREATE TABLE IF NOT EXISTS karir.job_criteria (
    id BIGSERIAL PRIMARY KEY,
    job_id BIGINT NOT NULL REFERENCES karir.jobs(id),
    criterion_id BIGINT NOT NULL REFERENCES karir.criteria(id),
    active BOOLEAN NOT NULL DEFAULT TRUE,
    UNIQUE (job_id, criterion_id)
);

CREATE TABLE IF NOT EXISTS karir.job_sub_criteria (
    id BIGSERIAL PRIMARY KEY,
    job_id BIGINT NOT NULL REFERENCES karir.jobs(id),
    sub_criterion_id BIGINT NOT NULL REFERENCES karir.sub_criteria(id),
    active BOOLEAN NOT NULL DEFAULT TRUE,
    ideal_value INTEGER NOT NULL DEFAULT 3,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (job_id, sub_criterion_id)
);

CREATE TABLE IF NOT EXISTS karir.ahp_judgments (
    id BIGSERIAL PRIMARY KEY,
    job_id BIGINT NOT NULL REFERENCES karir.jobs(id),
    criterion_a BIGINT NOT NULL REFERENCES karir.criteria(id),
    criterion_b BIGINT NOT NULL REFERENCES karir.criteria(id),
    value DOUBLE PRECISION NOT NULL CHECK (value > 0),
    UNIQUE (job_id, criterion_a, criterion_b)
);

CREATE TABLE IF NOT EXISTS karir.ahp_weights (
    id BIGSERIAL PRIMARY KEY,
    job_id BIGINT NOT NULL REFERENCES karir.jobs(id),
    criterion_id BIGINT NOT NULL REFERENCES karir.criteria(id),
    weight DOUBLE PRECISION NOT NULL,
    lambda_max DOUBLE PRECISION NOT NULL,
    consistency_index DOUBLE PRECISION NOT NULL,
    consistency_ratio DOUBLE PRECISION NOT NULL,
    is_consistent BOOLEAN NOT NULL,
    UNIQUE (job_id, criterion_id)
);

CREATE TABLE IF NOT EXISTS karir.pm_results (
    job_id BIGINT PRIMARY KEY REFERENCES karir.jobs(id),
    final_score DOUBLE PRECISION NOT NULL,
    computed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;
