use tafweed_core::{Platform, ServiceCatalog};

use crate::render::print_json;
use crate::{Context, OutputFormat};

pub(crate) fn cmd_services(ctx: &Context, platform: Option<Platform>, search: Option<&str>) {
    let catalog = ServiceCatalog::builtin();
    let hits = catalog.search(platform, search.unwrap_or(""));

    match ctx.output {
        OutputFormat::Json => print_json(&hits),
        OutputFormat::Text => {
            let lang = ctx.language();
            for s in &hits {
                let default = s
                    .default_duration
                    .map(|d| d.label(lang).to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<20} {:<16} {} / {} [{}]",
                    s.id,
                    s.platform.label(lang),
                    s.name_ar,
                    s.name_en,
                    default
                );
            }
            if hits.is_empty() && !ctx.quiet {
                eprintln!("no matching services");
            }
        }
    }
}
