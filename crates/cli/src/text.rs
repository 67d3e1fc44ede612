use plag_check_core::{ProjectScan, RenderedComparison, ScanStats, Token};

pub(crate) fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

pub(crate) fn format_scan_stats(stats: &ScanStats) -> String {
    let mut out = String::new();
    out.push_str("== scan stats ==\n");
    out.push_str(&format!(
        "candidates={} compared_pairs={}\n",
        stats.candidate_files, stats.compared_pairs
    ));

    let mut skips: Vec<(&str, u64)> = vec![
        ("unsupported", stats.skipped_unsupported),
        ("empty", stats.skipped_empty),
        ("failed", stats.failed_files),
    ];
    skips.retain(|(_, v)| *v > 0);
    if !skips.is_empty() {
        out.push_str("skipped:\n");
        for (k, v) in skips {
            out.push_str(&format!("- {k}={v}\n"));
        }
    }
    out.push('\n');
    out
}

pub(crate) fn format_scan(scan: &ProjectScan) -> String {
    let mut out = String::new();
    let flagged = scan.files.iter().filter(|f| !f.matches.is_empty()).count();
    out.push_str(&format!(
        "files: {} flagged: {}\n",
        scan.files.len(),
        flagged
    ));

    for report in &scan.files {
        out.push('\n');
        out.push_str(&format!(
            "{} ratio={} matches={}\n",
            report.file,
            format_percent(report.ratio),
            report.matches.len()
        ));
        for m in &report.matches {
            out.push_str(&format!(
                "- [{}] {} ratio={}\n",
                m.project_title,
                m.file,
                format_percent(m.ratio)
            ));
        }
    }

    if !scan.failures.is_empty() {
        out.push_str("\nfailures:\n");
        for id in &scan.failures {
            out.push_str(&format!("- {id}\n"));
        }
    }

    out.push('\n');
    out
}

pub(crate) fn format_comparison(
    first_label: &str,
    second_label: &str,
    rendered: &RenderedComparison,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {first_label} ==\n"));
    out.push_str(rendered.first_file.trim_end_matches('\n'));
    out.push_str("\n\n");
    out.push_str(&format!("== {second_label} ==\n"));
    out.push_str(rendered.second_file.trim_end_matches('\n'));
    out.push_str("\n\n");
    out.push_str(&format!("similarity: {}\n", format_percent(rendered.ratio)));
    out
}

/// Lays the two token streams out in two columns, one token kind per row.
pub(crate) fn format_token_columns(first: &[Token], second: &[Token]) -> String {
    let width = first.iter().map(|t| t.kind().len()).max().unwrap_or(0);
    let rows = first.len().max(second.len());

    let mut out = String::new();
    for row in 0..rows {
        let left = first.get(row).map_or("", Token::kind);
        let right = second.get(row).map_or("", Token::kind);
        let line = format!("{left:<width$}  {right}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
