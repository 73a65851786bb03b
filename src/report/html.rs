use crate::types::report::AssessmentReport;
use chrono::DateTime;
use html_escape::encode_safe;

const PRIMARY: &str = "#CB202D";

/// Standalone snapshot suitable for download.
pub fn to_html(report: &AssessmentReport) -> String {
    let generated = DateTime::parse_from_rfc3339(&report.generated_at)
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| report.generated_at.clone());

    let items: String = report
        .top()
        .iter()
        .map(|result| {
            format!(
                "<li><b>{}</b> ({}% fit)</li>",
                encode_safe(&result.cluster),
                result.percent
            )
        })
        .collect();

    format!(
        "<html><head><meta charset='utf-8'><title>Career Report</title></head>\n\
<body style='font-family:Arial,sans-serif'>\n\
  <h2 style='color:{PRIMARY}'>Career Snapshot</h2>\n\
  <p><b>Name:</b> {name}</p>\n\
  <p><b>Grade:</b> {grade}</p>\n\
  <h3>Top Recommendations</h3>\n\
  <ol>{items}</ol>\n\
  <p style='font-size:12px;color:#666'>Generated on {generated}</p>\n\
</body></html>\n",
        name = encode_safe(&report.student.name),
        grade = encode_safe(&report.student.grade),
    )
}
