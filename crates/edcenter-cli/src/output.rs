//! Rendering of API responses for the terminal.

use anyhow::Result;
use edcenter_core::models::{Class, PageMeta, PaginatedResponse, Payment, Student, Subject, Teacher};
use serde::Serialize;

use crate::commands::OutputFormat;

/// A record that can be shown as one line of a table.
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Student {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "GRADE", "PHONE", "PAYMENT"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.grade.clone(),
            self.phone.clone(),
            self.payment_status.clone(),
        ]
    }
}

impl TableRow for Teacher {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "EMAIL", "STATUS", "CLASSES"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name(),
            self.email.clone(),
            format!("{:?}", self.status).to_lowercase(),
            self.classes_count.to_string(),
        ]
    }
}

impl TableRow for Class {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "SUBJECT", "TEACHER", "STUDENTS", "FEE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.subject_name.clone(),
            self.teacher_name.clone(),
            format!("{}/{}", self.student_count, self.max_students),
            format!("{:.2}", self.monthly_fee),
        ]
    }
}

impl TableRow for Subject {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "FEE", "STUDENTS"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name_en.clone(),
            format!("{:.2}", self.fee_amount),
            self.student_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for Payment {
    fn headers() -> &'static [&'static str] {
        &["ID", "STUDENT", "SUBJECT", "PERIOD", "AMOUNT", "METHOD"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.student_name.clone(),
            self.subject_name.clone(),
            self.period(),
            format!("{:.2}", self.amount),
            self.payment_method.clone(),
        ]
    }
}

/// Format rows as aligned columns separated by two spaces.
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    let headers = T::headers();
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(headers.to_vec())];
    for row in &cells {
        lines.push(format_line(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

fn page_footer(meta: &PageMeta) -> Option<String> {
    if meta.total_pages == 0 {
        return None;
    }
    let mut footer = format!(
        "Page {} of {} ({} total)",
        meta.current_page, meta.total_pages, meta.total_count
    );
    if meta.has_next_page() {
        footer.push_str(&format!(", next: --page {}", meta.current_page + 1));
    }
    Some(footer)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_page<T: TableRow + Serialize>(
    format: OutputFormat,
    page: &PaginatedResponse<T>,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(page),
        OutputFormat::Table => {
            print_rows(format, &page.data)?;
            if let Some(footer) = page_footer(&page.meta) {
                println!("{}", footer);
            }
            Ok(())
        }
    }
}

pub fn print_rows<T: TableRow + Serialize>(format: OutputFormat, rows: &[T]) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Table if rows.is_empty() => {
            println!("No results");
            Ok(())
        }
        OutputFormat::Table => {
            println!("{}", render_table(rows));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_table_aligns_columns() {
        let subjects = vec![
            Subject {
                id: "1".to_string(),
                name_en: "Mathematics".to_string(),
                fee_amount: 50.0,
                student_count: Some(12),
                ..Default::default()
            },
            Subject {
                id: "22".to_string(),
                name_en: "Art".to_string(),
                fee_amount: 7.5,
                ..Default::default()
            },
        ];
        let expected = [
            "ID  NAME         FEE    STUDENTS",
            "1   Mathematics  50.00  12",
            "22  Art          7.50   -",
        ]
        .join("\n");
        assert_eq!(render_table(&subjects), expected);
    }

    #[test]
    fn test_page_footer() {
        let meta = PageMeta {
            current_page: 1,
            total_pages: 3,
            total_count: 40,
            per_page: 15,
        };
        assert_eq!(
            page_footer(&meta).as_deref(),
            Some("Page 1 of 3 (40 total), next: --page 2")
        );
        assert_eq!(page_footer(&PageMeta::default()), None);
    }
}
