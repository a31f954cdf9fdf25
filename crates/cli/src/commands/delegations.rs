use std::process;

use tafweed_core::{
    CreateDelegationInput, DelegationStatus, DurationType, ListFilter, ListView, Party, Platform,
    ServiceCatalog, ValidationError,
};
use time::OffsetDateTime;

use crate::render::{self, print_json};
use crate::{report_error, Context, OutputFormat};

pub(crate) fn cmd_list(ctx: &Context, party: Party, view: ListView, status: Option<DelegationStatus>) {
    let repo = ctx.repository();
    let records = repo.list(party, ctx.party_id(party), ListFilter { view, status });

    match ctx.output {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Text => {
            let lang = ctx.language();
            for d in &records {
                println!("{}", render::line(d, lang));
            }
            if !ctx.quiet {
                eprintln!("{} delegation(s)", records.len());
            }
        }
    }
}

pub(crate) fn cmd_show(ctx: &Context, id: &str, party: Party) {
    let repo = ctx.repository();
    match repo.get(id) {
        Some(d) => render::print_delegation(d, party, ctx.output, ctx.language()),
        None => {
            report_error(
                &format!("error: delegation '{}' not found", id),
                ctx.output,
                ctx.quiet,
            );
            process::exit(1);
        }
    }
}

pub(crate) struct CreateArgs<'a> {
    pub service: Option<&'a str>,
    pub platform: Option<Platform>,
    pub delegate_id: &'a str,
    pub delegate_name: &'a str,
    pub phone: &'a str,
    pub duration: Option<DurationType>,
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
}

pub(crate) fn cmd_create(ctx: &Context, args: CreateArgs<'_>) {
    let catalog = ServiceCatalog::builtin();
    let service = match (args.service, args.platform) {
        (Some(id), _) => catalog.find(id).ok_or_else(|| ValidationError::UnknownService {
            service_id: id.to_string(),
        }),
        (None, Some(platform)) => catalog
            .first_for(platform)
            .ok_or(ValidationError::MissingField { field: "serviceId" }),
        (None, None) => Err(ValidationError::MissingField { field: "serviceId" }),
    };
    let service = match service {
        Ok(s) => s,
        Err(e) => ctx.fail(&e.into()),
    };
    let duration = args
        .duration
        .or(service.default_duration)
        .unwrap_or(DurationType::Hours24);
    let input = CreateDelegationInput::for_service(
        service,
        args.delegate_id,
        args.delegate_name,
        args.phone,
        duration,
    )
    .with_window(args.start, args.end);

    let mut repo = ctx.repository();
    match repo.create(input) {
        Ok(d) => match ctx.output {
            OutputFormat::Json => print_json(&d),
            OutputFormat::Text => {
                if ctx.quiet {
                    println!("{}", d.id);
                } else {
                    println!("created {}", d.id);
                    print!("{}", render::detail(&d, Party::Grantor, ctx.language()));
                }
            }
        },
        Err(e) => ctx.fail(&e),
    }
}
