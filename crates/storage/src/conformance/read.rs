use super::{expect_value, put, Outcome};
use crate::KeyValueStore;

pub(super) fn run_read_tests<S, F>(factory: &F) -> Vec<Outcome>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    vec![
        ("missing_key_reads_none", missing_key_reads_none(factory)),
        ("read_after_write_returns_value", read_after_write_returns_value(factory)),
        ("repeated_reads_are_stable", repeated_reads_are_stable(factory)),
        ("reading_one_key_does_not_create_another", reading_one_key_does_not_create_another(factory)),
    ]
}

fn missing_key_reads_none<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let s = factory();
    match s.get("absher-delegations") {
        Ok(None) => Ok(()),
        other => Err(format!("expected Ok(None), got {:?}", other)),
    }
}

fn read_after_write_returns_value<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    put(&mut s, "absher-delegations", "[]")?;
    expect_value(&s, "absher-delegations", "[]")
}

fn repeated_reads_are_stable<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    put(&mut s, "absher-settings", r#"{"language":"ar"}"#)?;
    for _ in 0..3 {
        expect_value(&s, "absher-settings", r#"{"language":"ar"}"#)?;
    }
    Ok(())
}

fn reading_one_key_does_not_create_another<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    put(&mut s, "absher-settings", "{}")?;
    let _ = s.get("absher-delegations");
    match s.get("absher-delegations") {
        Ok(None) => Ok(()),
        other => Err(format!("expected Ok(None) after read-only access, got {:?}", other)),
    }
}
