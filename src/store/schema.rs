pub const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "Courses" (
    id_course TEXT PRIMARY KEY,
    name_course TEXT NOT NULL,
    code TEXT,
    credits REAL NOT NULL DEFAULT 0,
    level TEXT,
    language TEXT,
    professor TEXT,
    topics TEXT
);

CREATE TABLE IF NOT EXISTS program_structures (
    program_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    level TEXT,
    total_credits INTEGER NOT NULL,
    duration TEXT NOT NULL DEFAULT '',
    contact_email TEXT,
    website TEXT,
    internship TEXT,
    seeded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS program_specializations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    code TEXT NOT NULL,
    name TEXT NOT NULL,
    color TEXT NOT NULL,
    sort_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS program_credit_components (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    name TEXT NOT NULL,
    credits REAL NOT NULL,
    color TEXT NOT NULL,
    sort_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS program_courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    name TEXT NOT NULL,
    credits REAL NOT NULL,
    category TEXT NOT NULL,
    specializations TEXT NOT NULL DEFAULT '',
    sort_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS program_minors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    name TEXT NOT NULL,
    credits REAL NOT NULL,
    description TEXT,
    sort_order INTEGER NOT NULL
);
"#;

pub const POSTGRES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "Courses" (
    id_course TEXT PRIMARY KEY,
    name_course TEXT NOT NULL,
    code TEXT,
    credits DOUBLE PRECISION NOT NULL DEFAULT 0,
    level TEXT,
    language TEXT,
    professor TEXT,
    topics TEXT
);

CREATE TABLE IF NOT EXISTS program_structures (
    program_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    level TEXT,
    total_credits INTEGER NOT NULL,
    duration TEXT NOT NULL DEFAULT '',
    contact_email TEXT,
    website TEXT,
    internship TEXT,
    seeded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS program_specializations (
    id BIGSERIAL PRIMARY KEY,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    code TEXT NOT NULL,
    name TEXT NOT NULL,
    color TEXT NOT NULL,
    sort_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS program_credit_components (
    id BIGSERIAL PRIMARY KEY,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    name TEXT NOT NULL,
    credits DOUBLE PRECISION NOT NULL,
    color TEXT NOT NULL,
    sort_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS program_courses (
    id BIGSERIAL PRIMARY KEY,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    name TEXT NOT NULL,
    credits DOUBLE PRECISION NOT NULL,
    category TEXT NOT NULL,
    specializations TEXT NOT NULL DEFAULT '',
    sort_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS program_minors (
    id BIGSERIAL PRIMARY KEY,
    program_id TEXT NOT NULL REFERENCES program_structures(program_id),
    name TEXT NOT NULL,
    credits DOUBLE PRECISION NOT NULL,
    description TEXT,
    sort_order INTEGER NOT NULL
);
"#;

/// Hijos de un programa, en orden de borrado
pub const CHILD_TABLES: [&str; 4] =
    ["program_specializations", "program_credit_components", "program_courses", "program_minors"];
