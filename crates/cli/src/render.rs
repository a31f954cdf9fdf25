//! Text and JSON rendering of delegations for terminal output.

use serde::Serialize;
use tafweed_core::lifecycle::{available_actions, AvailableActions};
use tafweed_core::{Delegation, Language, Party};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::OutputFormat;

/// Pretty-print any serializable value to stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}

pub(crate) fn timestamp(t: OffsetDateTime) -> String {
    t.format(&Rfc3339).unwrap_or_else(|_| t.to_string())
}

/// One summary line per delegation.
pub(crate) fn line(d: &Delegation, lang: Language) -> String {
    format!(
        "{:<18} {:<12} {} -> {} ({}, {})",
        d.id,
        d.status.label(lang),
        d.service_name(lang),
        d.delegate_name,
        d.platform.label(lang),
        d.duration_type.label(lang),
    )
}

pub(crate) fn detail(d: &Delegation, party: Party, lang: Language) -> String {
    detail_at(d, party, lang, OffsetDateTime::now_utc())
}

/// Detail block with the actions open to `party` at `now`.
pub(crate) fn detail_at(d: &Delegation, party: Party, lang: Language, now: OffsetDateTime) -> String {
    let view = d.visibility(party);
    let mut out = String::new();
    out.push_str(&format!("{}\n", d.id));
    out.push_str(&format!("  service:   {} [{}]\n", d.service_name(lang), d.service_id));
    out.push_str(&format!(
        "  platform:  {}{}\n",
        d.platform.label(lang),
        if d.is_digital_service { " (digital)" } else { "" }
    ));
    out.push_str(&format!("  grantor:   {} ({})\n", d.grantor_name, d.grantor_id));
    out.push_str(&format!(
        "  delegate:  {} ({}, {})\n",
        d.delegate_name, d.delegate_id, d.delegate_phone
    ));
    out.push_str(&format!(
        "  window:    {} .. {} ({})\n",
        timestamp(d.start_at),
        timestamp(d.end_at),
        d.duration_type.label(lang)
    ));
    out.push_str(&format!(
        "  status:    {} / delegate {}\n",
        d.status.label(lang),
        d.delegate_status
    ));
    if let Some(at) = d.delegate_accepted_at {
        out.push_str(&format!("  accepted:  {}\n", timestamp(at)));
    }
    if view.archived {
        out.push_str(&format!("  archived for {}\n", party));
    }
    let actions = action_names(available_actions(d, party, now));
    if !actions.is_empty() {
        out.push_str(&format!("  actions:   {}\n", actions.join(", ")));
    }
    out
}

fn action_names(a: AvailableActions) -> Vec<&'static str> {
    [
        (a.accept, "accept"),
        (a.reject, "reject"),
        (a.archive, "archive"),
        (a.unarchive, "unarchive"),
        (a.delete, "delete"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DelegationView<'a> {
    #[serde(flatten)]
    delegation: &'a Delegation,
    available_actions: AvailableActions,
}

/// Print a single delegation, with the actions open to `party`.
pub(crate) fn print_delegation(d: &Delegation, party: Party, output: OutputFormat, lang: Language) {
    match output {
        OutputFormat::Json => print_json(&DelegationView {
            delegation: d,
            available_actions: available_actions(d, party, OffsetDateTime::now_utc()),
        }),
        OutputFormat::Text => print!("{}", detail(d, party, lang)),
    }
}
