use tafweed_core::{Delegation, Party, VisibilityAction};
use tafweed_repository::RepositoryError;

use crate::render::{self, print_json};
use crate::{Context, OutputFormat};

fn finish(ctx: &Context, result: Result<Delegation, RepositoryError>, verb: &str, party: Party) {
    match result {
        Ok(d) => match ctx.output {
            OutputFormat::Json => print_json(&d),
            OutputFormat::Text => {
                if !ctx.quiet {
                    println!("{} {}", verb, d.id);
                    print!("{}", render::detail(&d, party, ctx.language()));
                }
            }
        },
        Err(e) => ctx.fail(&e),
    }
}

pub(crate) fn cmd_accept(ctx: &Context, id: &str, accept_terms: bool) {
    if !accept_terms && !ctx.quiet && ctx.output == OutputFormat::Text {
        eprintln!("hint: pass --accept-terms to confirm the delegation terms");
    }
    let mut repo = ctx.repository();
    let result = repo.accept(id, accept_terms);
    finish(ctx, result, "accepted", Party::Delegate);
}

pub(crate) fn cmd_reject(ctx: &Context, id: &str) {
    let mut repo = ctx.repository();
    let result = repo.reject(id);
    finish(ctx, result, "rejected", Party::Delegate);
}

pub(crate) fn cmd_archive(ctx: &Context, id: &str, party: Party, undo: bool) {
    let (action, verb) = if undo {
        (VisibilityAction::Unarchive, "unarchived")
    } else {
        (VisibilityAction::Archive, "archived")
    };
    let mut repo = ctx.repository();
    let result = repo.set_visibility(id, party, action);
    finish(ctx, result, verb, party);
}

pub(crate) fn cmd_delete(ctx: &Context, id: &str, party: Party) {
    let mut repo = ctx.repository();
    let result = repo.set_visibility(id, party, VisibilityAction::Delete);
    finish(ctx, result, "deleted", party);
}

pub(crate) fn cmd_sweep(ctx: &Context) {
    let mut repo = ctx.repository();
    match repo.sweep_expired() {
        Ok(changed) => match ctx.output {
            OutputFormat::Json => {
                let items: Vec<_> = changed
                    .iter()
                    .filter_map(|id| repo.get(id))
                    .map(|d| serde_json::json!({ "id": d.id, "status": d.status }))
                    .collect();
                print_json(&serde_json::json!({ "changed": items }));
            }
            OutputFormat::Text => {
                for id in &changed {
                    if let Some(d) = repo.get(id) {
                        println!("{} -> {}", d.id, d.status);
                    }
                }
                if !ctx.quiet {
                    eprintln!("{} delegation(s) closed", changed.len());
                }
            }
        },
        Err(e) => ctx.fail(&e),
    }
}
