use super::{expect_value, put, Outcome};
use crate::KeyValueStore;

pub(super) fn run_payload_tests<S, F>(factory: &F) -> Vec<Outcome>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    vec![
        ("arabic_text_round_trips", arabic_text_round_trips(factory)),
        ("whitespace_and_newlines_preserved", whitespace_and_newlines_preserved(factory)),
        ("large_blob_round_trips", large_blob_round_trips(factory)),
    ]
}

fn arabic_text_round_trips<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    let blob = r#"[{"grantorName":"سعود العتيبي","serviceNameAr":"استلام رخصة القيادة"}]"#;
    put(&mut s, "absher-delegations", blob)?;
    expect_value(&s, "absher-delegations", blob)
}

fn whitespace_and_newlines_preserved<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    let blob = "{\n  \"language\": \"ar\",\r\n\t\"largeText\": true\n}\n";
    put(&mut s, "absher-settings", blob)?;
    expect_value(&s, "absher-settings", blob)
}

fn large_blob_round_trips<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    let record = r#"{"id":"del-1001","delegateName":"محمد القحطاني"},"#;
    let blob = format!("[{}]", record.repeat(2_000).trim_end_matches(','));
    put(&mut s, "absher-delegations", &blob)?;
    expect_value(&s, "absher-delegations", &blob)
}
