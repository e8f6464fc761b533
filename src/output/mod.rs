pub mod report;

use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;

use crate::records::{NameDisplay, UserRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".csv") {
        return Some(OutputFormat::Csv);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputRecord {
    pub index: usize,
    pub name: String,
    pub first: String,
    pub last: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub cell: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub nationality: String,
    pub picture: String,
}

pub fn build_records(records: &[UserRecord]) -> Vec<OutputRecord> {
    records
        .iter()
        .enumerate()
        .map(|(index, r)| OutputRecord {
            index,
            name: r.full_name(),
            first: r.name.first.clone(),
            last: r.name.last.clone(),
            gender: r.gender_label(),
            email: r.email.clone(),
            phone: r.phone.clone(),
            cell: r.cell.clone(),
            country: r.location.country.clone(),
            city: r.location.city.clone(),
            address: r.postal_address(),
            nationality: r.nat.clone(),
            picture: r.picture.large.clone(),
        })
        .collect()
}

const TABLE_HEADER: [&str; 5] = ["#", "Name", "Gender", "Email", "Country"];

fn table_rows(records: &[UserRecord], name_display: NameDisplay) -> Vec<[String; 5]> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                i.to_string(),
                r.display_name(name_display),
                r.gender_label(),
                r.email.clone(),
                r.location.country.clone(),
            ]
        })
        .collect()
}

fn column_widths(rows: &[[String; 5]]) -> [usize; 5] {
    let mut widths = TABLE_HEADER.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

// colored, aligned table for the terminal
pub fn render_table(records: &[UserRecord], name_display: NameDisplay) -> String {
    let rows = table_rows(records, name_display);
    let widths = column_widths(&rows);

    let mut out = String::new();
    let header = TABLE_HEADER
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| format!("{:<width$}", h, width = *w))
        .join("  ");
    out.push_str(&format!("{}\n", header.bold().white()));

    for row in rows {
        let line = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .join("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

// plain aligned table for file export
pub fn render_text(records: &[OutputRecord]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            r.index, r.name, r.gender, r.email, r.country
        ));
    }
    out.into_bytes()
}

pub fn render_json(records: &[OutputRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn render_csv(records: &[OutputRecord]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("index,name,gender,email,phone,country,city,address,nationality\n");
    for r in records {
        let row = [
            r.index.to_string(),
            r.name.clone(),
            r.gender.clone(),
            r.email.clone(),
            r.phone.clone(),
            r.country.clone(),
            r.city.clone(),
            r.address.clone(),
            r.nationality.clone(),
        ]
        .iter()
        .map(|v| escape_csv(v))
        .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_html(records: &[OutputRecord]) -> Vec<u8> {
    report::render_html(records)
}
