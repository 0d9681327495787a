use labeler_core::models::Record;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusSummary {
    pub file: String,
    pub total: usize,
    pub classified: usize,
    pub unclassified: usize,
    /// 1-based record a labeling session would open at.
    pub resume_at: usize,
    pub categories: BTreeMap<String, usize>,
}

pub fn summarize(file: &str, records: &[Record]) -> StatusSummary {
    let mut categories = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_classified()) {
        *categories.entry(record.label().to_string()).or_insert(0) += 1;
    }
    let classified = categories.values().sum();
    let resume_at = records
        .iter()
        .position(|r| !r.is_classified())
        .unwrap_or(0)
        + 1;
    StatusSummary {
        file: file.to_string(),
        total: records.len(),
        classified,
        unclassified: records.len() - classified,
        resume_at,
        categories,
    }
}

pub fn render_text(summary: &StatusSummary) -> String {
    let mut out = format!(
        "{}: {} records, {} classified, {} unclassified, resume at {}",
        summary.file, summary.total, summary.classified, summary.unclassified, summary.resume_at
    );
    for (label, count) in &summary.categories {
        out.push_str(&format!("\n  {label}: {count}"));
    }
    out
}
