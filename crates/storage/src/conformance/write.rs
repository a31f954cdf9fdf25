use super::{expect_value, put, Outcome};
use crate::KeyValueStore;

pub(super) fn run_write_tests<S, F>(factory: &F) -> Vec<Outcome>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    vec![
        ("overwrite_replaces_whole_value", overwrite_replaces_whole_value(factory)),
        ("shorter_overwrite_leaves_no_tail", shorter_overwrite_leaves_no_tail(factory)),
        ("keys_are_independent", keys_are_independent(factory)),
        ("empty_value_is_distinct_from_missing", empty_value_is_distinct_from_missing(factory)),
    ]
}

fn overwrite_replaces_whole_value<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    put(&mut s, "absher-delegations", r#"[{"id":"del-1"}]"#)?;
    put(&mut s, "absher-delegations", r#"[{"id":"del-2"},{"id":"del-1"}]"#)?;
    expect_value(&s, "absher-delegations", r#"[{"id":"del-2"},{"id":"del-1"}]"#)
}

fn shorter_overwrite_leaves_no_tail<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    put(&mut s, "absher-delegations", &"x".repeat(512))?;
    put(&mut s, "absher-delegations", "[]")?;
    expect_value(&s, "absher-delegations", "[]")
}

fn keys_are_independent<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    put(&mut s, "absher-delegations", "[]")?;
    put(&mut s, "absher-settings", r#"{"language":"en"}"#)?;
    put(&mut s, "absher-delegations", r#"[{"id":"del-9"}]"#)?;
    expect_value(&s, "absher-settings", r#"{"language":"en"}"#)?;
    expect_value(&s, "absher-delegations", r#"[{"id":"del-9"}]"#)
}

fn empty_value_is_distinct_from_missing<S, F>(factory: &F) -> Result<(), String>
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut s = factory();
    put(&mut s, "absher-settings", "")?;
    match s.get("absher-settings") {
        Ok(Some(v)) if v.is_empty() => Ok(()),
        other => Err(format!("expected Ok(Some(\"\")), got {:?}", other)),
    }
}
