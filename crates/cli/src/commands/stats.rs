use tafweed_core::{DurationType, Platform};

use crate::render::{self, print_json};
use crate::{Context, OutputFormat};

/// Number of recent delegations shown on the dashboard.
const LATEST: usize = 3;

pub(crate) fn cmd_stats(ctx: &Context) {
    let repo = ctx.repository();
    let summary = repo.summary();
    let stats = repo.stats();
    let latest = repo.latest(LATEST);

    match ctx.output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "summary": summary,
            "analytics": stats,
            "latest": latest,
        })),
        OutputFormat::Text => {
            let lang = ctx.language();
            println!(
                "pending {}  active {}  completed {}  total {}",
                summary.pending, summary.active, summary.completed, summary.total
            );
            println!(
                "success rate {}%  ({} accepted, {} rejected of {})",
                stats.success_rate, stats.accepted, stats.rejected, stats.total
            );
            for d in DurationType::ALL {
                let n = stats.by_duration.get(d.as_str()).copied().unwrap_or(0);
                println!("  {:<14} {}", d.label(lang), n);
            }
            for p in Platform::ALL {
                let n = stats.by_platform.get(p.as_str()).copied().unwrap_or(0);
                println!("  {:<14} {}", p.label(lang), n);
            }
            if !latest.is_empty() {
                println!("latest:");
                for d in latest {
                    println!("  {}", render::line(d, lang));
                }
            }
        }
    }
}
