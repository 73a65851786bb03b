use crate::types::catalog::POOLS;
use crate::types::report::AssessmentReport;

pub fn to_markdown(report: &AssessmentReport) -> String {
    let mut output = String::new();
    output.push_str("# Career Assessment Report\n\n");
    if !report.student.name.is_empty() {
        output.push_str(&format!("Student: {}", report.student.name));
        if !report.student.grade.is_empty() {
            output.push_str(&format!(" (grade {})", report.student.grade));
        }
        output.push_str("\n\n");
    }

    output.push_str("## Facet Scores\n\n");
    for spec in POOLS.iter() {
        let Some(scores) = report.facets.get(spec.key).filter(|scores| !scores.is_empty()) else {
            continue;
        };
        output.push_str(&format!("### {}\n\n", spec.title));
        for (facet, score) in scores {
            output.push_str(&format!("- {facet}: {score}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Top Career Clusters\n\n");
    if report.clusters.is_empty() {
        output.push_str("Answer more questions to generate your career clusters.\n");
        return output;
    }
    for (rank, result) in report.top().iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({}% fit)\n",
            rank + 1,
            result.cluster,
            result.percent
        ));
        if !result.description.is_empty() {
            output.push_str(&format!("   {}\n", result.description));
        }
        if !result.suggestions.is_empty() {
            output.push_str("   Try this next:\n");
            for suggestion in &result.suggestions {
                output.push_str(&format!("   - {suggestion}\n"));
            }
        }
    }

    if let Some(future_fit) = report.future_fit {
        output.push_str(&format!("\n## FutureFit Index\n\n{future_fit}/100\n"));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;

    #[test]
    fn markdown_report_contains_sections() {
        let rendered = to_markdown(&sample_report());
        assert!(rendered.contains("# Career Assessment Report"));
        assert!(rendered.contains("Student: Meera (grade 12)"));
        assert!(rendered.contains("### Interests (RIASEC)"));
        assert!(rendered.contains("1. Engineer (100% fit)"));
        assert!(rendered.contains("   - Join a robotics club"));
        assert!(rendered.contains("64/100"));
    }

    #[test]
    fn markdown_report_prompts_for_more_answers_without_clusters() {
        let mut report = sample_report();
        report.clusters.clear();
        report.future_fit = None;
        let rendered = to_markdown(&report);
        assert!(rendered.contains("Answer more questions"));
        assert!(!rendered.contains("FutureFit"));
    }
}
