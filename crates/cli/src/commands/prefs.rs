use tafweed_core::{Language, Preferences, Toggle};

use crate::render::print_json;
use crate::{Context, OutputFormat};

pub(crate) enum PrefsAction {
    Show,
    /// `None` switches to the other language.
    Language(Option<Language>),
    Toggle(Toggle),
    Reset,
}

pub(crate) fn cmd_prefs(ctx: &Context, action: PrefsAction) {
    let mut store = ctx.preferences();
    let result = match action {
        PrefsAction::Show => Ok(store.get()),
        PrefsAction::Language(language) => {
            let next = language.unwrap_or_else(|| store.get().language.toggled());
            store.set_language(next)
        }
        PrefsAction::Toggle(toggle) => store.toggle(toggle),
        PrefsAction::Reset => store.reset(),
    };
    match result {
        Ok(prefs) => print_prefs(ctx, &prefs),
        Err(e) => ctx.fail(&e),
    }
}

fn print_prefs(ctx: &Context, prefs: &Preferences) {
    match ctx.output {
        OutputFormat::Json => print_json(prefs),
        OutputFormat::Text => {
            let on_off = |b: bool| if b { "on" } else { "off" };
            let direction = if prefs.language.is_rtl() { "rtl" } else { "ltr" };
            println!("language       {} ({})", prefs.language, direction);
            println!("large-text     {}", on_off(prefs.large_text));
            println!("high-contrast  {}", on_off(prefs.high_contrast));
            println!("big-buttons    {}", on_off(prefs.big_buttons));
        }
    }
}
