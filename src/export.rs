//! Exportación CSV de listas de cursos del plan.

use crate::linker::LinkedEntry;

pub const CSV_HEADER: [&str; 7] = ["name", "category", "ects", "specializations", "course_id", "code", "confidence"];

/// Todos los campos van entre comillas; las comillas internas se duplican.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn format_ects(v: f64) -> String {
    if v.fract() == 0.0 { format!("{}", v as i64) } else { v.to_string() }
}

fn csv_line(fields: &[String]) -> String {
    let mut line = fields.iter().map(|f| quote(f)).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

pub fn curriculum_to_csv<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a LinkedEntry>,
{
    let header: Vec<String> = CSV_HEADER.iter().map(|s| s.to_string()).collect();
    let mut out = csv_line(&header);
    for e in entries {
        let fields = vec![
            e.entry.name.clone(),
            e.entry.category.to_string(),
            format_ects(e.entry.credits),
            e.entry.specializations.join(";"),
            e.link.as_ref().map(|l| l.id.clone()).unwrap_or_default(),
            e.course.as_ref().and_then(|c| c.code.clone()).unwrap_or_default(),
            e.link.as_ref().map(|l| l.confidence.to_string()).unwrap_or_default(),
        ];
        out.push_str(&csv_line(&fields));
    }
    out
}
