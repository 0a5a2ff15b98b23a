//! Markdown analysis-report rendering

use crate::agent::state::HistoryTurn;

/// Render a chat history into a markdown analysis report: a heading per
/// turn role, the content, a rule between turns.
pub fn render_report(history: &[HistoryTurn]) -> String {
    let mut out = String::from("# RFP Analysis Report\n\n");

    for turn in history {
        out.push_str("## ");
        out.push_str(&turn.role.to_uppercase());
        out.push_str("\n\n");
        out.push_str(&turn.content);
        out.push_str("\n\n---\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_structure() {
        let history = vec![
            HistoryTurn::new("user", "What is the deadline?"),
            HistoryTurn::new("assistant", "Submissions close March 1."),
        ];
        let report = render_report(&history);

        assert!(report.starts_with("# RFP Analysis Report"));
        assert!(report.contains("## USER"));
        assert!(report.contains("What is the deadline?"));
        assert!(report.contains("## ASSISTANT"));
        assert!(report.contains("Submissions close March 1."));
        assert_eq!(report.matches("---").count(), 2);
    }

    #[test]
    fn test_empty_history() {
        let report = render_report(&[]);
        assert_eq!(report, "# RFP Analysis Report\n\n");
    }
}
