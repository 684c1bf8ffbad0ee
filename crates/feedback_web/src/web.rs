use feedback::config::ClientConfig;
use tracing::{error, info, warn};
use web_sys::Document;

mod chart;
mod dashboard_page;
mod dom;
mod http;
mod logging;
mod mobile_menu;
mod storage;
mod survey_page;

const LOCALSTORAGE_CONFIG_KEY: &str = "feedback.client_config.v1";

/// Boots whichever flows the current page's markup contains.
pub fn start() {
    let loaded = storage::load_client_config();
    let config = loaded.as_ref().ok().cloned().flatten().unwrap_or_default();
    logging::init(&config.log_level);
    if let Err(e) = &loaded {
        warn!("ignoring stored client config: {e}");
    }

    let doc = match dom::document() {
        Ok(d) => d,
        Err(e) => {
            error!("cannot start: {e}");
            return;
        }
    };

    if doc.ready_state() == "loading" {
        let ready_doc = doc.clone();
        let res = dom::listen_once(&doc, "DOMContentLoaded", move || boot(&ready_doc, &config));
        if let Err(e) = res {
            error!("cannot wait for DOMContentLoaded: {e}");
        }
    } else {
        boot(&doc, &config);
    }
}

fn boot(doc: &Document, config: &ClientConfig) {
    if dom::by_id(doc, "question-1").is_some() {
        match survey_page::SurveyPage::attach(doc, config) {
            Ok(_) => info!("survey ready"),
            Err(e) => error!("survey not attached: {e}"),
        }
    }

    if dom::by_id(doc, "feedback-body").is_some() || dom::by_id(doc, "today-count").is_some() {
        match dashboard_page::DashboardPage::attach(doc, config) {
            Ok(_) => info!("dashboard ready"),
            Err(e) => error!("dashboard not attached: {e}"),
        }
    }

    if dom::query_first(doc, ".sidebar").is_some() {
        if let Err(e) = mobile_menu::MobileNav::install(doc, config) {
            error!("mobile menu not installed: {e}");
        }
    }
}
