//! Three-way pathway draft selection.

use jiff::civil::Date;
use log::warn;
use serde_json::Value;

use crate::{
    error::{PlannerError, Result},
    models::{DraftDay, DraftType, PathwayDraft},
};

/// Number of drafts a response must contain.
pub const DRAFT_COUNT: usize = 3;

/// Pick one draft per [`DraftType`] from a model response.
///
/// The response is either `{"drafts": [...]}` or the bare array. For each slot
/// the draft labelled with that type wins; otherwise the draft at the slot's
/// position, otherwise the first draft. The chosen draft is re-labelled to the
/// slot type, so the result always holds exactly one draft of each type.
/// Drafts without usable `days` get one synthesized headline per date.
///
/// # Errors
///
/// Returns `PlannerError::SchemaMismatch` when the response does not hold
/// exactly three drafts.
pub fn select_drafts(response: &Value, dates: &[Date]) -> Result<[PathwayDraft; DRAFT_COUNT]> {
    let drafts = response
        .get("drafts")
        .unwrap_or(response)
        .as_array()
        .ok_or_else(|| PlannerError::schema("drafts", "must be an array"))?;

    if drafts.len() != DRAFT_COUNT {
        return Err(PlannerError::schema(
            "drafts",
            format!("expected exactly {DRAFT_COUNT} drafts, got {}", drafts.len()),
        ));
    }

    Ok(DraftType::ALL.map(|slot| {
        let position = DraftType::ALL.iter().position(|t| *t == slot).unwrap_or(0);
        let chosen = drafts
            .iter()
            .find(|draft| draft_type_of(draft) == Some(slot))
            .or_else(|| {
                warn!("No '{}' draft in response, using position {position}", slot.as_str());
                drafts.get(position)
            })
            .or_else(|| drafts.first())
            .unwrap_or(&Value::Null);
        build_draft(slot, chosen, dates)
    }))
}

fn draft_type_of(draft: &Value) -> Option<DraftType> {
    draft.get("type")?.as_str()?.parse().ok()
}

fn build_draft(slot: DraftType, raw: &Value, dates: &[Date]) -> PathwayDraft {
    let title = text(raw, "title").unwrap_or_else(|| slot.default_title().to_string());
    let days = parse_days(raw, dates.len()).unwrap_or_else(|| {
        warn!("Draft '{}' has no usable days, synthesizing headlines", slot.as_str());
        fallback_days(slot, dates)
    });

    PathwayDraft {
        draft_type: slot,
        title,
        summary: text(raw, "summary"),
        days,
    }
}

fn text(raw: &Value, field: &str) -> Option<String> {
    raw.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// All days of the draft, or `None` if any entry is unusable.
fn parse_days(raw: &Value, expected: usize) -> Option<Vec<DraftDay>> {
    let days = raw.get("days")?.as_array()?;
    if days.is_empty() || (expected > 0 && days.len() != expected) {
        return None;
    }
    days.iter()
        .map(|day| {
            Some(DraftDay {
                date: day.get("date")?.as_str()?.trim().parse().ok()?,
                headline: text(day, "headline")?,
            })
        })
        .collect()
}

fn fallback_days(slot: DraftType, dates: &[Date]) -> Vec<DraftDay> {
    dates
        .iter()
        .enumerate()
        .map(|(index, date)| DraftDay {
            date: *date,
            headline: format!("Day {}: {}", index + 1, slot.default_title()),
        })
        .collect()
}
