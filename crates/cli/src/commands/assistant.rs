use std::io::BufRead;

use serde::Serialize;
use tafweed_core::chat::{ChatDraft, ChatMessage, ChatRole, ChatSession, SUGGESTIONS};
use tafweed_core::{Delegation, IntentDetector, Language, ServiceCatalog};

use crate::render::{self, print_json};
use crate::{report_error, Context, OutputFormat};

pub(crate) fn cmd_detect(ctx: &Context, text: &str, explain: bool) {
    let catalog = ServiceCatalog::builtin();
    let detector = IntentDetector::new(&catalog);

    if explain {
        let matches = detector.explain(text);
        match ctx.output {
            OutputFormat::Json => print_json(&serde_json::json!({
                "rules": matches,
                "draft": detector.detect(text),
            })),
            OutputFormat::Text => {
                for m in &matches {
                    println!("{:?}: {}", m.rule, describe(&m.hint));
                }
                println!("=> {}", describe(&detector.detect(text)));
            }
        }
        return;
    }

    let draft = detector.detect(text);
    match ctx.output {
        OutputFormat::Json => print_json(&draft),
        OutputFormat::Text => println!("{}", describe(&draft)),
    }
}

fn describe(draft: &tafweed_core::IntentDraft) -> String {
    if draft.is_empty() {
        return "nothing detected".to_string();
    }
    let mut parts = Vec::new();
    if let Some(ref s) = draft.service_id {
        parts.push(format!("service={}", s));
    }
    if let Some(p) = draft.platform {
        parts.push(format!("platform={}", p));
    }
    if let Some(d) = draft.duration_type {
        parts.push(format!("duration={}", d));
    }
    parts.join(" ")
}

pub(crate) struct ChatArgs {
    pub messages: Vec<String>,
    pub delegate_name: Option<String>,
    pub delegate_id: Option<String>,
    pub phone: Option<String>,
    pub create: bool,
    pub lang: Option<Language>,
}

#[derive(Serialize)]
struct ChatTranscript<'a> {
    messages: &'a [ChatMessage],
    draft: &'a ChatDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<&'a Delegation>,
    /// Starter prompts, offered only when the user sent nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestions: Option<&'static [&'static str]>,
}

pub(crate) fn cmd_chat(ctx: &Context, args: ChatArgs) {
    let catalog = ServiceCatalog::builtin();
    let lang = args.lang.unwrap_or_else(|| ctx.language());
    let mut session = ChatSession::new(&catalog, lang);

    {
        let draft = session.draft_mut();
        if let Some(name) = args.delegate_name {
            draft.delegate_name = name;
        }
        if let Some(id) = args.delegate_id {
            draft.delegate_id = id;
        }
        if let Some(phone) = args.phone {
            draft.delegate_phone = phone;
        }
    }

    let messages = if args.messages.is_empty() {
        read_stdin_lines()
    } else {
        args.messages
    };
    let mut sent = 0;
    for message in &messages {
        if session.send(message).is_some() {
            sent += 1;
        }
    }
    let suggestions = (sent == 0).then_some(&SUGGESTIONS[..]);

    let created = if args.create {
        let input = match session.draft().to_input(&catalog) {
            Ok(input) => input,
            Err(e) => ctx.fail(&e.into()),
        };
        let mut repo = ctx.repository();
        match repo.create(input) {
            Ok(d) => {
                session.confirm_created();
                Some(d)
            }
            Err(e) => ctx.fail(&e),
        }
    } else {
        None
    };

    match ctx.output {
        OutputFormat::Json => print_json(&ChatTranscript {
            messages: session.messages(),
            draft: session.draft(),
            created: created.as_ref(),
            suggestions,
        }),
        OutputFormat::Text => {
            for m in session.messages() {
                let who = match m.role {
                    ChatRole::User => "you",
                    ChatRole::Assistant => "assistant",
                };
                println!("{:>9}: {}", who, m.text);
            }
            for s in suggestions.unwrap_or_default() {
                println!("      try: {}", s);
            }
            if let Some(ref d) = created {
                if !ctx.quiet {
                    print!("{}", render::detail(d, tafweed_core::Party::Grantor, lang));
                }
            }
        }
    }
}

fn read_stdin_lines() -> Vec<String> {
    let stdin = std::io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        match line {
            Ok(l) => lines.push(l),
            Err(e) => {
                report_error(&format!("error reading stdin: {}", e), OutputFormat::Text, false);
                break;
            }
        }
    }
    lines
}
