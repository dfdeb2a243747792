use chrono::Utc;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::schema::CHILD_TABLES;
use crate::error::Result;
use crate::models::{Course, CourseCategory, Level, ProgramStructure};
use crate::structure::{ComponentRow, CourseRow, MinorRow, ProgramRows, SpecializationRow};

fn level_param(level: Level) -> Option<&'static str> {
    match level {
        Level::Unspecified => None,
        l => Some(l.as_str()),
    }
}

pub fn seed_program(conn: &mut Connection, rows: &ProgramRows) -> Result<()> {
    let pid = rows.structure.program_id.as_str();
    let s = &rows.structure;
    let ts = Utc::now().to_rfc3339();

    let tx = conn.transaction()?;
    for table in CHILD_TABLES {
        tx.execute(&format!("DELETE FROM {} WHERE program_id = ?1", table), params![pid])?;
    }
    tx.execute(
        "INSERT INTO program_structures (
            program_id, name, level, total_credits, duration,
            contact_email, website, internship, seeded_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT(program_id) DO UPDATE SET
            name = excluded.name,
            level = excluded.level,
            total_credits = excluded.total_credits,
            duration = excluded.duration,
            contact_email = excluded.contact_email,
            website = excluded.website,
            internship = excluded.internship,
            seeded_at = excluded.seeded_at",
        params![
            pid,
            s.name,
            level_param(s.level),
            s.total_credits,
            s.duration,
            s.contact_email,
            s.website,
            s.internship,
            ts,
        ],
    )?;

    for r in &rows.specializations {
        tx.execute(
            "INSERT INTO program_specializations (program_id, code, name, color, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![pid, r.code, r.name, r.color, r.sort_order],
        )?;
    }
    for r in &rows.components {
        tx.execute(
            "INSERT INTO program_credit_components (program_id, name, credits, color, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![pid, r.name, r.credits, r.color, r.sort_order],
        )?;
    }
    for r in &rows.courses {
        tx.execute(
            "INSERT INTO program_courses (program_id, name, credits, category, specializations, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![pid, r.name, r.credits, r.category.as_str(), r.specializations_text(), r.sort_order],
        )?;
    }
    for r in &rows.minors {
        tx.execute(
            "INSERT INTO program_minors (program_id, name, credits, description, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![pid, r.name, r.credits, r.description, r.sort_order],
        )?;
    }
    tx.commit()?;
    Ok(())
}

fn structure_from_row(row: &Row<'_>) -> rusqlite::Result<ProgramStructure> {
    let level: Option<String> = row.get(2)?;
    Ok(ProgramStructure {
        program_id: row.get(0)?,
        name: row.get(1)?,
        level: Level::from_db(level.as_deref()),
        total_credits: row.get(3)?,
        duration: row.get(4)?,
        contact_email: row.get(5)?,
        website: row.get(6)?,
        internship: row.get(7)?,
    })
}

const STRUCTURE_COLUMNS: &str =
    "program_id, name, level, total_credits, duration, contact_email, website, internship";

pub fn list_programs(conn: &Connection) -> Result<Vec<ProgramStructure>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM program_structures ORDER BY program_id",
        STRUCTURE_COLUMNS
    ))?;
    let rows_iter = stmt.query_map([], structure_from_row)?;
    let mut out = Vec::new();
    for r in rows_iter {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_program_rows(conn: &Connection, program_id: &str) -> Result<Option<ProgramRows>> {
    let structure = conn
        .query_row(
            &format!("SELECT {} FROM program_structures WHERE program_id = ?1", STRUCTURE_COLUMNS),
            params![program_id],
            structure_from_row,
        )
        .optional()?;
    let Some(structure) = structure else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT code, name, color, sort_order FROM program_specializations
         WHERE program_id = ?1 ORDER BY sort_order",
    )?;
    let specializations = stmt
        .query_map(params![program_id], |row| {
            Ok(SpecializationRow {
                program_id: program_id.to_string(),
                code: row.get(0)?,
                name: row.get(1)?,
                color: row.get(2)?,
                sort_order: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT name, credits, color, sort_order FROM program_credit_components
         WHERE program_id = ?1 ORDER BY sort_order",
    )?;
    let components = stmt
        .query_map(params![program_id], |row| {
            Ok(ComponentRow {
                program_id: program_id.to_string(),
                name: row.get(0)?,
                credits: row.get(1)?,
                color: row.get(2)?,
                sort_order: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT name, credits, category, specializations, sort_order FROM program_courses
         WHERE program_id = ?1 ORDER BY sort_order",
    )?;
    let raw_courses = stmt
        .query_map(params![program_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i32>(4)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let mut courses = Vec::with_capacity(raw_courses.len());
    for (name, credits, category, specs, sort_order) in raw_courses {
        // categorías desconocidas se ignoran
        let Ok(category) = category.parse::<CourseCategory>() else {
            warn!("program '{}': skipping course '{}' with category '{}'", program_id, name, category);
            continue;
        };
        courses.push(CourseRow {
            program_id: program_id.to_string(),
            name,
            credits,
            category,
            specializations: CourseRow::parse_specializations(&specs),
            sort_order,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT name, credits, description, sort_order FROM program_minors
         WHERE program_id = ?1 ORDER BY sort_order",
    )?;
    let minors = stmt
        .query_map(params![program_id], |row| {
            Ok(MinorRow {
                program_id: program_id.to_string(),
                name: row.get(0)?,
                credits: row.get(1)?,
                description: row.get(2)?,
                sort_order: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(ProgramRows { structure, specializations, components, courses, minors }))
}

pub fn list_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn.prepare(
        r#"SELECT id_course, name_course, code, credits, level, language, professor, topics
           FROM "Courses" ORDER BY id_course"#,
    )?;
    let rows_iter = stmt.query_map([], |row| {
        let level: Option<String> = row.get(4)?;
        Ok(Course {
            id_course: row.get(0)?,
            name_course: row.get(1)?,
            code: row.get(2)?,
            credits: row.get(3)?,
            level: Level::from_db(level.as_deref()),
            language: row.get(5)?,
            professor: row.get(6)?,
            topics: row.get(7)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows_iter {
        out.push(r?);
    }
    Ok(out)
}

pub fn upsert_courses(conn: &mut Connection, courses: &[Course]) -> Result<usize> {
    let tx = conn.transaction()?;
    for c in courses {
        tx.execute(
            r#"INSERT INTO "Courses" (id_course, name_course, code, credits, level, language, professor, topics)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
               ON CONFLICT(id_course) DO UPDATE SET
                   name_course = excluded.name_course,
                   code = excluded.code,
                   credits = excluded.credits,
                   level = excluded.level,
                   language = excluded.language,
                   professor = excluded.professor,
                   topics = excluded.topics"#,
            params![
                c.id_course,
                c.name_course,
                c.code,
                c.credits,
                level_param(c.level),
                c.language,
                c.professor,
                c.topics,
            ],
        )?;
    }
    tx.commit()?;
    Ok(courses.len())
}
