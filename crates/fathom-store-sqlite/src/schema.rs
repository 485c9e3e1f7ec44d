//! SQL schema for the Fathom SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Concepts are never deleted; archiving is a status change.
CREATE TABLE IF NOT EXISTS concepts (
    concept_id   TEXT PRIMARY KEY,
    owner_id     TEXT NOT NULL,
    title        TEXT NOT NULL CHECK (length(trim(title)) > 0),
    description  TEXT,
    subject      TEXT,
    topic        TEXT,
    tags         TEXT,            -- JSON array or NULL
    difficulty   TEXT NOT NULL DEFAULT 'beginner'
                 CHECK (difficulty IN ('beginner', 'intermediate', 'advanced')),
    status       TEXT NOT NULL DEFAULT 'draft'
                 CHECK (status IN ('draft', 'published', 'archived')),
    created_at   TEXT NOT NULL,   -- RFC 3339 UTC
    updated_at   TEXT NOT NULL
);

-- Ownership is derived from the parent concept; it is not stored here.
CREATE TABLE IF NOT EXISTS steps (
    step_id      TEXT PRIMARY KEY,
    concept_id   TEXT NOT NULL REFERENCES concepts(concept_id),
    step_number  INTEGER NOT NULL DEFAULT 1 CHECK (step_number >= 1),
    step_type    TEXT NOT NULL DEFAULT 'other'
                 CHECK (step_type IN ('intuition', 'definition', 'explanation',
                                      'example', 'analogy', 'summary', 'other')),
    heading      TEXT,
    content      TEXT NOT NULL CHECK (length(trim(content)) > 0),
    example      TEXT,
    analogy      TEXT,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS checks (
    check_id       TEXT PRIMARY KEY,
    concept_id     TEXT NOT NULL REFERENCES concepts(concept_id),
    question       TEXT NOT NULL CHECK (length(trim(question)) > 0),
    options        TEXT,          -- opaque JSON or NULL
    correct_answer TEXT,          -- opaque JSON or NULL
    explanation    TEXT,
    check_type     TEXT NOT NULL DEFAULT 'single_choice'
                   CHECK (check_type IN ('single_choice', 'multiple_choice',
                                         'true_false', 'short_answer')),
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS jobs (
    job_id      TEXT PRIMARY KEY,
    concept_id  TEXT REFERENCES concepts(concept_id),
    owner_id    TEXT NOT NULL,
    job_type    TEXT NOT NULL DEFAULT 'step_breakdown'
                CHECK (job_type IN ('step_breakdown', 'check_generation',
                                    'explanation', 'analogy')),
    input       TEXT,             -- opaque JSON or NULL
    output      TEXT,             -- opaque JSON or NULL
    status      TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'completed', 'failed')),
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS concepts_owner_idx  ON concepts(owner_id);
CREATE INDEX IF NOT EXISTS steps_concept_idx   ON steps(concept_id);
CREATE INDEX IF NOT EXISTS checks_concept_idx  ON checks(concept_id);
CREATE INDEX IF NOT EXISTS jobs_owner_idx      ON jobs(owner_id);

PRAGMA user_version = 1;
";
