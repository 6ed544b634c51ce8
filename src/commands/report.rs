/// Archived reports: listing, deleting and rendering

use serde::{Deserialize, Serialize};

use crate::commands::{parse_id, StatusResponse};
use crate::domain::{AnalysisReport, DateRange, Reflection, ReportId, Suggestion};
use crate::storage::JournalStorage;
use crate::JournalError;

/// Response from listing archived reports
#[derive(Debug, Serialize)]
pub struct ListReportsResponse {
    pub reports: Vec<AnalysisReport>,
    pub total_count: usize,
}

/// All archived reports, newest first
pub fn list_reports<S: JournalStorage>(storage: &S) -> Result<ListReportsResponse, JournalError> {
    let reports = storage.list_reports()?;

    Ok(ListReportsResponse {
        total_count: reports.len(),
        reports,
    })
}

#[derive(Debug, Deserialize)]
pub struct DeleteReportParams {
    pub report_id: String,
}

pub fn delete_report<S: JournalStorage>(
    storage: &S,
    params: DeleteReportParams,
) -> Result<StatusResponse, JournalError> {
    let report_id = parse_id(&params.report_id, "informe", ReportId::from_string)?;
    storage.delete_report(&report_id)?;

    Ok(StatusResponse {
        success: true,
        message: format!("Informe {} borrado", report_id),
    })
}

/// Plain-text rendering shared by fresh reflections and archived reports
pub struct ReportText<'a> {
    pub range: &'a DateRange,
    pub summary: &'a str,
    pub evolution: &'a str,
    pub guidance: &'a [String],
    pub suggestions: &'a [Suggestion],
    pub sources: usize,
}

impl<'a> From<&'a Reflection> for ReportText<'a> {
    fn from(r: &'a Reflection) -> Self {
        Self {
            range: &r.range,
            summary: &r.summary,
            evolution: &r.evolution,
            guidance: &r.guidance,
            suggestions: &r.suggestions,
            sources: r.grounding_chunks.as_ref().map_or(0, Vec::len),
        }
    }
}

impl<'a> From<&'a AnalysisReport> for ReportText<'a> {
    fn from(r: &'a AnalysisReport) -> Self {
        Self {
            range: &r.range,
            summary: &r.summary,
            evolution: &r.evolution,
            guidance: &r.guidance,
            suggestions: &r.suggestions,
            sources: r.grounding_chunks.as_ref().map_or(0, Vec::len),
        }
    }
}

impl ReportText<'_> {
    pub fn render(&self) -> String {
        let span = match self.range.days() {
            1 => "1 día".to_string(),
            n => format!("{} días", n),
        };
        let mut out = format!(
            "Período {} a {} ({})\n\nSíntesis\n{}\n\nEvolución\n{}\n",
            self.range.start.format("%d/%m/%Y"),
            self.range.end.format("%d/%m/%Y"),
            span,
            self.summary,
            self.evolution
        );

        if !self.guidance.is_empty() {
            out.push_str("\nHoja de ruta\n");
            for (i, step) in self.guidance.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, step));
            }
        }

        if !self.suggestions.is_empty() {
            out.push_str("\nRecursos\n");
            for s in self.suggestions {
                let category = serde_json::to_value(s.category)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                out.push_str(&format!("- [{}] {}: {}", category, s.title, s.description));
                if let Some(link) = &s.link {
                    out.push_str(&format!(" ({})", link));
                }
                out.push('\n');
            }
        }

        if self.sources > 0 {
            out.push_str(&format!("\n{} fuentes consultadas\n", self.sources));
        }

        out
    }
}
