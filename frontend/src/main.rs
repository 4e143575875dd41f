mod components;
mod services;

use gloo::events::EventListener;
use log::{error, info, LevelFilter};
use shared::{WaitlistConfig, WidgetError};
use web_sys::Document;

use components::waitlist_modal;

fn log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn start(document: &Document) {
    match waitlist_modal::mount(document, WaitlistConfig::default()) {
        Ok(mounted) => mounted.keep_alive(),
        Err(WidgetError::MissingElement(selector)) => {
            info!("no {} on this page, waitlist modal not mounted", selector);
        }
        Err(e) => error!("waitlist modal failed to mount: {}", e),
    }
}

fn run() -> anyhow::Result<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow::anyhow!("no document available"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| start(&target)).forget();
    } else {
        start(&document);
    }
    Ok(())
}

fn main() {
    services::logging::init(log_level());

    if let Err(e) = run() {
        error!("waitlist modal failed to start: {:#}", e);
    }
}
