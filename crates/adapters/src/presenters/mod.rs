use boardkit_domain::{Board, BoardImage, ExportReport, ImportReport};
use serde::Serialize;

pub fn present_board_row(board: &Board) -> String {
    format!("{}\t{}", board.id, board.name)
}

pub fn present_image_row(image: &BoardImage) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        image.name,
        image.category.as_str(),
        if image.starred { "*" } else { "-" },
        image.created_at
    )
}

pub fn present_import_report(report: &ImportReport) -> Vec<String> {
    let mut lines = vec![format!(
        "import finished: entries={}, imported={}, failed={}{}",
        report.total_entries,
        report.imported.len(),
        report.failures.len(),
        if report.cancelled { ", cancelled" } else { "" }
    )];
    lines.extend(report.imported.iter().map(|name| format!("imported\t{name}")));
    lines.extend(
        report
            .failures
            .iter()
            .map(|failure| format!("skipped\t{}\t{}", failure.entry, failure.reason)),
    );
    lines
}

pub fn present_export_report(report: &ExportReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .selected
        .iter()
        .map(|name| name.to_string())
        .collect();
    lines.extend(
        report
            .failures
            .iter()
            .map(|failure| format!("skipped\t{}\t{}", failure.entry, failure.reason)),
    );
    if !report.message.is_empty() {
        lines.push(report.message.clone());
    }
    lines
}

pub fn present_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| format!("{{\"error\":\"{error}\"}}"))
}
