use serde_json::json;
use serde_json::Value as JSValue;

use locality_report::format::locality_sentence;
use locality_report::{DisplayEntry, ReportView};

const BAR_CELLS: usize = 20;
// Used for entries without a color of their own, like the total.
const DEFAULT_BAR_COLOR: &str = "#000000";

fn entry_to_json(entry: &DisplayEntry) -> JSValue {
    let percent = if entry.percent_complete.is_finite() {
        json!(entry.percent_complete)
    } else {
        JSValue::Null
    };
    json!({
        "id": entry.locality.id,
        "name": entry.locality.name,
        "ballotsCounted": entry.locality.ballots_counted,
        "ballotsExpected": entry.locality.ballots_expected,
        "percentComplete": percent,
        "percentLabel": entry.bar.label,
        "color": entry.color.map(|c| c.to_string()),
        "total": entry.is_total,
    })
}

pub fn view_to_json(view: &ReportView) -> JSValue {
    let localities: Vec<JSValue> = view.entries.iter().map(entry_to_json).collect();
    json!({
        "name": view.title,
        "lastUpdated": view.last_updated_label,
        "summary": view.summary,
        "query": view.query,
        "showAll": view.show_all_hint,
        "localities": localities,
    })
}

fn text_bar(entry: &DisplayEntry) -> String {
    let filled = if entry.bar.visible {
        ((entry.bar.width_percent / 100.0) * BAR_CELLS as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(BAR_CELLS);
    format!(
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(BAR_CELLS - filled),
        entry.bar.label
    )
}

pub fn view_to_text(view: &ReportView) -> String {
    let mut lines: Vec<String> = vec![
        view.title.clone(),
        format!("Last updated: {}", view.last_updated_label),
        view.summary.clone(),
        String::new(),
    ];
    for entry in view.entries.iter() {
        let color = entry
            .color
            .map(|c| c.to_string())
            .unwrap_or_else(|| DEFAULT_BAR_COLOR.to_string());
        lines.push(locality_sentence(&entry.locality));
        lines.push(format!("{} {}", text_bar(entry), color));
        if entry.is_total {
            lines.push(String::new());
        }
    }
    if view.show_all_hint {
        lines.push("Show all".to_string());
    }
    lines.join("\n")
}
