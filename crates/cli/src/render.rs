use std::fmt::Write;

use chrono::NaiveDate;
use directory_engine::{DirectoryEntry, EngineConfig, Freshness};
use serde::Serialize;

const NO_PARKING_INFO: &str = "정보 없음";
const NO_NOTES: &str = "내용 없음";
const NO_RESULTS: &str = "검색 결과가 없습니다.";

/// Renderer-facing view of one entry
#[derive(Debug, Serialize)]
pub struct Card<'a> {
    #[serde(flatten)]
    pub entry: &'a DirectoryEntry<'a>,
    pub fingerprint: String,
    pub freshness: Freshness,
    pub map_search_url: Option<String>,
}

impl<'a> Card<'a> {
    pub fn new(entry: &'a DirectoryEntry<'a>, today: NaiveDate, config: &EngineConfig) -> Self {
        Self {
            entry,
            fingerprint: entry.record.fingerprint(),
            freshness: Freshness::classify(entry.record.last_visit, today, &config.freshness),
            map_search_url: entry.record.map_search_url(),
        }
    }
}

fn freshness_badge(freshness: Freshness, config: &EngineConfig) -> String {
    match freshness {
        Freshness::Stale => format!("🔴 {}일 이상 미방문", config.freshness.stale_days),
        Freshness::Aging => format!("🟡 {}일 이상 미방문", config.freshness.aging_days),
        Freshness::Recent => "🟢 최근 방문".to_string(),
        Freshness::Unknown => "⚪ 방문 기록 없음".to_string(),
    }
}

/// Plain-text card grid: `columns` cards per group, groups separated by a rule.
pub fn render_cards(
    title: &str,
    cards: &[Card<'_>],
    columns: usize,
    config: &EngineConfig,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count().max(8) * 2));

    if cards.is_empty() {
        let _ = writeln!(out, "{NO_RESULTS}");
        return out;
    }

    for (group_idx, group) in cards.chunks(columns.max(1)).enumerate() {
        let first = group_idx * columns.max(1) + 1;
        let last = first + group.len() - 1;
        let _ = writeln!(out, "── {first}-{last} / {} ──", cards.len());
        for card in group {
            render_card(&mut out, card, config);
        }
    }
    out
}

fn render_card(out: &mut String, card: &Card<'_>, config: &EngineConfig) {
    let record = card.entry.record;
    let star = if card.entry.is_favorite { "★" } else { "☆" };
    let name = if record.name.is_empty() {
        "(이름 없음)"
    } else {
        record.name.as_str()
    };
    let _ = writeln!(
        out,
        "{star} {name}  [{}]  {}",
        card.entry.classification,
        freshness_badge(card.freshness, config)
    );

    if !record.tags.is_empty() {
        let tags: Vec<String> = record.tags.iter().map(|tag| format!("#{tag}")).collect();
        let _ = writeln!(out, "   {}", tags.join(" "));
    }

    match &card.map_search_url {
        Some(url) => {
            let _ = writeln!(out, "   📍 {}  <{url}>", record.address);
        }
        None => {
            let _ = writeln!(out, "   📍 -");
        }
    }

    for (k, dept) in record.departments.iter().enumerate() {
        let phone = dept
            .tel_href(&config.placeholder)
            .map_or_else(|| dept.phone.clone(), |href| format!("{} <{href}>", dept.phone));
        let _ = writeln!(out, "   {}. {}  {} / {phone}", k + 1, dept.label, dept.contact);
    }

    let _ = writeln!(
        out,
        "   🚗 주차 및 진입 정보: {}",
        record.parking.as_deref().unwrap_or(NO_PARKING_INFO)
    );
    let _ = writeln!(
        out,
        "   ⚠️ 거래처 성향/특이사항: {}",
        record.notes.as_deref().unwrap_or(NO_NOTES)
    );
    if let Some(url) = &record.image_url {
        let _ = writeln!(out, "   📷 {url}");
    }
    let _ = writeln!(out);
}
