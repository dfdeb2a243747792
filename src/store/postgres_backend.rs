use chrono::Utc;
use log::warn;
use postgres::{Client, NoTls, Row};

use super::schema::CHILD_TABLES;
use crate::error::{Error, Result};
use crate::models::{Course, CourseCategory, Level, ProgramStructure};
use crate::structure::{ComponentRow, CourseRow, MinorRow, ProgramRows, SpecializationRow};

/// Ejecuta `op` con un cliente recién conectado, en un hilo aparte.
pub fn run<T, F>(url: &str, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Client) -> std::result::Result<T, postgres::Error> + Send + 'static,
{
    let url = url.to_string();
    let handle = std::thread::spawn(move || -> std::result::Result<T, postgres::Error> {
        let mut client = Client::connect(&url, NoTls)?;
        op(&mut client)
    });
    match handle.join() {
        Ok(res) => Ok(res?),
        Err(e) => Err(Error::Thread(format!("{:?}", e))),
    }
}

fn level_param(level: Level) -> Option<String> {
    match level {
        Level::Unspecified => None,
        l => Some(l.as_str().to_string()),
    }
}

pub fn seed_program(url: &str, rows: &ProgramRows) -> Result<()> {
    let rows = rows.clone();
    let ts = Utc::now().to_rfc3339();
    run(url, move |client| {
        let pid = rows.structure.program_id.clone();
        let s = &rows.structure;
        let mut tx = client.transaction()?;
        for table in CHILD_TABLES {
            tx.execute(&format!("DELETE FROM {} WHERE program_id = $1", table), &[&pid])?;
        }
        tx.execute(
            "INSERT INTO program_structures (
                program_id, name, level, total_credits, duration,
                contact_email, website, internship, seeded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (program_id) DO UPDATE SET
                name = EXCLUDED.name,
                level = EXCLUDED.level,
                total_credits = EXCLUDED.total_credits,
                duration = EXCLUDED.duration,
                contact_email = EXCLUDED.contact_email,
                website = EXCLUDED.website,
                internship = EXCLUDED.internship,
                seeded_at = EXCLUDED.seeded_at",
            &[
                &pid,
                &s.name,
                &level_param(s.level),
                &s.total_credits,
                &s.duration,
                &s.contact_email,
                &s.website,
                &s.internship,
                &ts,
            ],
        )?;
        for r in &rows.specializations {
            tx.execute(
                "INSERT INTO program_specializations (program_id, code, name, color, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
                &[&pid, &r.code, &r.name, &r.color, &r.sort_order],
            )?;
        }
        for r in &rows.components {
            tx.execute(
                "INSERT INTO program_credit_components (program_id, name, credits, color, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
                &[&pid, &r.name, &r.credits, &r.color, &r.sort_order],
            )?;
        }
        for r in &rows.courses {
            tx.execute(
                "INSERT INTO program_courses (program_id, name, credits, category, specializations, sort_order)
                 VALUES ($1, $2, $3, $4, $5, $6)",
                &[&pid, &r.name, &r.credits, &r.category.as_str(), &r.specializations_text(), &r.sort_order],
            )?;
        }
        for r in &rows.minors {
            tx.execute(
                "INSERT INTO program_minors (program_id, name, credits, description, sort_order)
                 VALUES ($1, $2, $3, $4, $5)",
                &[&pid, &r.name, &r.credits, &r.description, &r.sort_order],
            )?;
        }
        tx.commit()
    })
}

const STRUCTURE_SELECT: &str = "SELECT program_id, name, level, total_credits, duration, contact_email, website, internship
     FROM program_structures";

type PgResult<T> = std::result::Result<T, postgres::Error>;

/// Créditos como f64 aunque la columna sea `integer`/`bigint`/`real`; la
/// tabla `Courses` la mantiene otro proceso.
fn credits_at(r: &Row, idx: usize) -> PgResult<f64> {
    match r.try_get::<_, f64>(idx) {
        Ok(v) => Ok(v),
        Err(e) => {
            if let Ok(v) = r.try_get::<_, i32>(idx) {
                Ok(f64::from(v))
            } else if let Ok(v) = r.try_get::<_, i64>(idx) {
                Ok(v as f64)
            } else if let Ok(v) = r.try_get::<_, f32>(idx) {
                Ok(f64::from(v))
            } else if let Ok(v) = r.try_get::<_, Option<f64>>(idx) {
                Ok(v.unwrap_or(0.0))
            } else {
                Err(e)
            }
        }
    }
}

fn structure_from_row(r: &Row) -> PgResult<ProgramStructure> {
    let level: Option<String> = r.try_get(2)?;
    Ok(ProgramStructure {
        program_id: r.try_get(0)?,
        name: r.try_get(1)?,
        level: Level::from_db(level.as_deref()),
        total_credits: r.try_get(3)?,
        duration: r.try_get(4)?,
        contact_email: r.try_get(5)?,
        website: r.try_get(6)?,
        internship: r.try_get(7)?,
    })
}

pub fn list_programs(url: &str) -> Result<Vec<ProgramStructure>> {
    run(url, |client| {
        let rows = client.query(&format!("{} ORDER BY program_id", STRUCTURE_SELECT), &[])?;
        rows.iter().map(structure_from_row).collect()
    })
}

pub fn load_program_rows(url: &str, program_id: &str) -> Result<Option<ProgramRows>> {
    let pid = program_id.to_string();
    run(url, move |client| {
        let found = client.query_opt(&format!("{} WHERE program_id = $1", STRUCTURE_SELECT), &[&pid])?;
        let Some(row) = found else {
            return Ok(None);
        };
        let structure = structure_from_row(&row)?;

        let specializations = client
            .query(
                "SELECT code, name, color, sort_order FROM program_specializations
                 WHERE program_id = $1 ORDER BY sort_order",
                &[&pid],
            )?
            .iter()
            .map(|r| -> PgResult<SpecializationRow> {
                Ok(SpecializationRow {
                    program_id: pid.clone(),
                    code: r.try_get(0)?,
                    name: r.try_get(1)?,
                    color: r.try_get(2)?,
                    sort_order: r.try_get(3)?,
                })
            })
            .collect::<PgResult<Vec<_>>>()?;

        let components = client
            .query(
                "SELECT name, credits, color, sort_order FROM program_credit_components
                 WHERE program_id = $1 ORDER BY sort_order",
                &[&pid],
            )?
            .iter()
            .map(|r| -> PgResult<ComponentRow> {
                Ok(ComponentRow {
                    program_id: pid.clone(),
                    name: r.try_get(0)?,
                    credits: r.try_get(1)?,
                    color: r.try_get(2)?,
                    sort_order: r.try_get(3)?,
                })
            })
            .collect::<PgResult<Vec<_>>>()?;

        let mut courses = Vec::new();
        for r in client.query(
            "SELECT name, credits, category, specializations, sort_order FROM program_courses
             WHERE program_id = $1 ORDER BY sort_order",
            &[&pid],
        )? {
            let name: String = r.try_get(0)?;
            let category: String = r.try_get(2)?;
            let Ok(category) = category.parse::<CourseCategory>() else {
                warn!("program '{}': skipping course '{}' with category '{}'", pid, name, category);
                continue;
            };
            let specs: String = r.try_get(3)?;
            courses.push(CourseRow {
                program_id: pid.clone(),
                name,
                credits: r.try_get(1)?,
                category,
                specializations: CourseRow::parse_specializations(&specs),
                sort_order: r.try_get(4)?,
            });
        }

        let minors = client
            .query(
                "SELECT name, credits, description, sort_order FROM program_minors
                 WHERE program_id = $1 ORDER BY sort_order",
                &[&pid],
            )?
            .iter()
            .map(|r| -> PgResult<MinorRow> {
                Ok(MinorRow {
                    program_id: pid.clone(),
                    name: r.try_get(0)?,
                    credits: r.try_get(1)?,
                    description: r.try_get(2)?,
                    sort_order: r.try_get(3)?,
                })
            })
            .collect::<PgResult<Vec<_>>>()?;

        Ok(Some(ProgramRows { structure, specializations, components, courses, minors }))
    })
}

pub fn list_courses(url: &str) -> Result<Vec<Course>> {
    run(url, |client| {
        let rows = client.query(
            r#"SELECT id_course, name_course, code, credits, level, language, professor, topics
               FROM "Courses" ORDER BY id_course"#,
            &[],
        )?;
        rows.iter()
            .map(|r| -> PgResult<Course> {
                let level: Option<String> = r.try_get(4)?;
                Ok(Course {
                    id_course: r.try_get(0)?,
                    name_course: r.try_get(1)?,
                    code: r.try_get(2)?,
                    credits: credits_at(r, 3)?,
                    level: Level::from_db(level.as_deref()),
                    language: r.try_get(5)?,
                    professor: r.try_get(6)?,
                    topics: r.try_get(7)?,
                })
            })
            .collect()
    })
}

pub fn upsert_courses(url: &str, courses: &[Course]) -> Result<usize> {
    let courses = courses.to_vec();
    run(url, move |client| {
        let mut tx = client.transaction()?;
        for c in &courses {
            tx.execute(
                r#"INSERT INTO "Courses" (id_course, name_course, code, credits, level, language, professor, topics)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                   ON CONFLICT (id_course) DO UPDATE SET
                       name_course = EXCLUDED.name_course,
                       code = EXCLUDED.code,
                       credits = EXCLUDED.credits,
                       level = EXCLUDED.level,
                       language = EXCLUDED.language,
                       professor = EXCLUDED.professor,
                       topics = EXCLUDED.topics"#,
                &[
                    &c.id_course,
                    &c.name_course,
                    &c.code,
                    &c.credits,
                    &level_param(c.level),
                    &c.language,
                    &c.professor,
                    &c.topics,
                ],
            )?;
        }
        tx.commit()?;
        Ok(courses.len())
    })
}
