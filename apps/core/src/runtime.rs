use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::collab::Collaborators;
use crate::config::{self, ConfigError};
use crate::contract::PageEvent;
use crate::controller::PageController;
use crate::dom::{MemoryPage, Page};
use crate::transport::{decode_event, encode_response, handle_event, TransportResponse};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub script_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let slot = match arg.as_str() {
            "--config" => &mut options.config_path,
            "--script" => &mut options.script_path,
            "--log-dir" => &mut options.log_dir,
            other => return Err(format!("unknown argument: {other}")),
        };
        let value = iter
            .next()
            .filter(|value| !value.starts_with("--"))
            .ok_or_else(|| format!("{arg} requires a path"))?;
        *slot = Some(PathBuf::from(value));
    }
    Ok(options)
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config_path.as_deref())?;
    let log_dir = options.log_dir.unwrap_or_else(|| config.log_dir.clone());
    crate::logging::init(&log_dir)?;
    tracing::info!(
        config_path = ?options.config_path,
        script_path = ?options.script_path,
        catalog = config.catalog.len(),
        "starting replay"
    );

    let controller = PageController::new(&config, demo_page(), Collaborators::headless())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let controller = match &options.script_path {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            replay(controller, BufReader::new(file), &mut out)?
        }
        None => replay(controller, std::io::stdin().lock(), &mut out)?,
    };

    writeln!(out, "{}", serde_json::to_string_pretty(controller.page())?)?;
    Ok(())
}

pub fn replay<R: BufRead, W: Write>(
    mut controller: PageController<MemoryPage>,
    script: R,
    out: &mut W,
) -> Result<PageController<MemoryPage>, RuntimeError> {
    for line in script.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let response = match decode_event(trimmed) {
            Ok(event) => {
                if let PageEvent::Input { value } = &event {
                    controller.page_mut().set_query_value(value);
                }
                TransportResponse::Ok {
                    dispatch: handle_event(&mut controller, event),
                }
            }
            Err(error) => TransportResponse::Err { error },
        };
        writeln!(out, "{}", encode_response(&response))?;
    }
    Ok(controller)
}

pub fn demo_page() -> MemoryPage {
    MemoryPage::new("Search")
        .with_main_region(None)
        .with_quick_search("Diabetes")
        .with_quick_search("Hypertension")
        .with_quick_search("Asthma")
        .with_result_cards(3)
        .with_copyable("Metformin remains first-line therapy for most adults with type 2 diabetes.")
        .with_copyable("Randomized trials show improved glycemic control with GLP-1 agonists.")
        .with_text_element(crate::enhancements::FEATURE_MODAL_LABEL_ID, "")
        .with_text_element(crate::enhancements::FEATURE_MODAL_TEXT_ID, "")
}
