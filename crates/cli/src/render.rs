use orchestrator::ViewState;
use orchestrator::domain::{DetailRecord, DisplayRecord, VersionSnapshot};
use orchestrator::transform::{
    convert_to_idr, format_detail_time, format_update_time, is_convertible,
};
use std::io::{self, Write};

/// Text rendering of a view snapshot.
pub fn view(state: &ViewState) -> String {
    let mut lines = Vec::new();

    if let Some(snapshot) = state.versions() {
        versions(&mut lines, snapshot);
        lines.push(String::new());
    }

    if let Some(error) = state.error() {
        lines.push(format!("Error: {error}"));
    }

    if state.is_loading() {
        lines.push("Loading...".to_owned());
    } else {
        let cards = state.filtered();
        lines.push(format!(
            "Exploits [{}] {} of {} (categories: {})",
            state.active_category(),
            cards.len(),
            state.records().len(),
            state.categories().join(", ")
        ));
        if cards.is_empty() {
            lines.push("  No exploits in this category.".to_owned());
        }
        lines.extend(cards.into_iter().map(card));
    }

    if let Some(open) = state.detail() {
        lines.push(String::new());
        detail(&mut lines, open);
    }

    if let Some(at) = state.last_updated() {
        lines.push(String::new());
        lines.push(format!("Last updated: {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write [`view`] to stdout in one go.
pub fn print(state: &ViewState) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(view(state).as_bytes())?;
    stdout.flush()
}

fn versions(lines: &mut Vec<String>, snapshot: &VersionSnapshot) {
    lines.push("Roblox versions".to_owned());
    for (platform, version, date) in snapshot.platforms() {
        lines.push(format!(
            "  {platform:<8} {version:<28} {}",
            format_detail_time(date)
        ));
    }
}

fn card(record: &DisplayRecord) -> String {
    format!(
        "  {:<20} {:<8} v{:<10} {:<8} {:<10} {:<22} {}",
        record.name,
        record.platform,
        record.version,
        record.status.to_string(),
        if record.detected { "Detected" } else { "Undetected" },
        price(&record.cost),
        format_update_time(&record.last_update),
    )
}

fn detail(lines: &mut Vec<String>, detail: &DetailRecord) {
    let card = &detail.card;
    lines.push(format!("{} ({})", card.name, card.id));
    if let Some(description) = &detail.description {
        lines.push(format!("  {description}"));
    }

    let links = [
        ("Developer", detail.developer.as_deref()),
        ("Website", detail.website_link.as_deref()),
        ("Discord", detail.discord_link.as_deref()),
        ("Purchase", detail.purchase_link.as_deref()),
        ("Type", detail.ex_type.as_deref()),
        ("Roblox version", detail.rbx_version.as_deref()),
    ];
    for (label, value) in links {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            lines.push(format!("  {label}: {value}"));
        }
    }

    let scores: Vec<String> = [("UNC", detail.unc_percentage), ("sUNC", detail.sunc_percentage)]
        .into_iter()
        .filter_map(|(label, value)| Some(format!("{label} {:.0}%", value?)))
        .collect();
    if !scores.is_empty() {
        lines.push(format!("  {}", scores.join(", ")));
    }

    let features: Vec<String> = [
        ("decompiler", detail.decompiler),
        ("multi-inject", detail.multi_inject),
        ("key system", detail.keysystem),
        ("element certified", detail.element_certified),
    ]
    .into_iter()
    .filter_map(|(label, value)| Some(format!("{label}: {}", yes_no(value?))))
    .collect();
    if !features.is_empty() {
        lines.push(format!("  {}", features.join(", ")));
    }

    lines.push(format!("  Price: {}", price(&card.cost)));
    lines.push(format!("  Updated: {}", format_detail_time(&card.last_update)));
}

fn price(cost: &str) -> String {
    if is_convertible(cost) {
        format!("{cost} ({})", convert_to_idr(cost))
    } else {
        cost.to_owned()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use orchestrator::domain::RawListingRecord;
    use orchestrator::fingerprint::Fingerprint;
    use serde_json::json;

    fn loaded(listing: serde_json::Value) -> ViewState {
        let raw: Vec<RawListingRecord> = serde_json::from_value(listing).unwrap();
        let fingerprint = Fingerprint::of_listing(&raw);
        let mut state = ViewState::default();
        state.apply_listing(raw, fingerprint, DateTime::from_timestamp(0, 0).unwrap());
        state
    }

    fn listing() -> serde_json::Value {
        json!([
            {
                "_id": "x1",
                "title": "Foo",
                "platform": "Windows",
                "version": "1.0",
                "updatedDate": "2024-01-31T15:05:00Z",
                "updateStatus": true,
                "free": true,
            },
            {
                "_id": "m1",
                "title": "Bar",
                "platform": "Mac",
                "version": "0.9",
                "updatedDate": "undefined",
                "cost": "$10",
                "detected": true,
                "websitelink": "https://bar.example.org",
                "uncPercentage": 91.6,
            },
        ])
    }

    #[test]
    fn loading_view() {
        assert_eq!(view(&ViewState::default()), "Loading...\n");
    }

    #[test]
    fn lists_cards_with_labels() {
        let rendered = view(&loaded(listing()));
        assert!(rendered.contains("Exploits [all] 2 of 2 (categories: all, mac, windows)"));
        assert!(rendered.contains("01/31/2024 at 3:05 PM UTC"));
        assert!(rendered.contains("$10 (Rp 167.000)"));
        assert!(rendered.contains("Date unavailable"));
        assert!(rendered.contains("Last updated: 1970-01-01 00:00:00 UTC"));
    }

    #[test]
    fn filtered_category_and_error() {
        let mut state = loaded(listing());
        state.select_category("linux");
        state.fail("HTTP error! status: 500");
        let rendered = view(&state);
        assert!(rendered.contains("Error: HTTP error! status: 500"));
        assert!(rendered.contains("0 of 2"));
        assert!(rendered.contains("No exploits in this category."));
    }

    #[test]
    fn open_detail() {
        let mut state = loaded(listing());
        assert!(state.open_detail("m1"));
        let rendered = view(&state);
        assert!(rendered.contains("Bar (m1)"));
        assert!(rendered.contains("  Detected - UNC Incompatible"));
        assert!(rendered.contains("  Developer: bar.example.org"));
        assert!(rendered.contains("  UNC 92%"));
        assert!(rendered.contains("  Updated: undefined"));
    }

    #[test]
    fn version_table() {
        let mut state = loaded(json!([]));
        let snapshot: VersionSnapshot = serde_json::from_value(json!({
            "Windows": "version-abc",
            "WindowsDate": "2024-01-31T15:05:00Z",
            "Mac": "version-def",
            "MacDate": "",
            "Android": "2.600.1",
            "AndroidDate": "",
            "iOS": "2.600.1",
            "iOSDate": "",
        }))
        .unwrap();
        let fingerprint = Fingerprint::of_versions(&snapshot);
        state.apply_versions(snapshot, fingerprint);

        let rendered = view(&state);
        assert!(rendered.starts_with("Roblox versions\n"));
        assert!(rendered.contains("version-abc"));
        assert!(rendered.contains("January 31, 2024, 03:05 PM"));
    }
}
