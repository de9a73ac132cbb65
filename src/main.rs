//! `showcase` preview binary.
//!
//! Mounts one section of a catalog on a deterministic page (scripted observer,
//! virtual clock), applies an optional query and category, scrolls the section
//! into view and plays the staggered reveal to completion.
//!
//! ```text
//! showcase --catalog about --section faq --query warranty
//! showcase --catalog ./content/home.json --section fleet --category locomotives --json
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use serde::Serialize;
use showcase::app::RevealEntry;
use showcase::content::{Catalog, BUILTIN_CATALOGS};
use showcase::domain::SectionId;
use showcase::observability::init_tracing;
use showcase::timers::ManualTimerHost;
use showcase::ui::SectionViewModel;
use showcase::visibility::{ElementId, ScriptedObserver};
use showcase::{initialize, Config, Result, ShowcaseError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "showcase", version, about = "Preview the staggered reveal of a landing page section")]
struct Cli {
    /// Built-in catalog name (home, about, services) or path to a JSON catalog.
    #[arg(long, default_value = "home")]
    catalog: String,

    /// Section to mount. Defaults to the catalog's first section.
    #[arg(long)]
    section: Option<String>,

    /// Search text applied before the section enters the view.
    #[arg(long)]
    query: Option<String>,

    /// Category chip to select ("all" clears the filter).
    #[arg(long)]
    category: Option<String>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    page: String,
    schedule: Vec<ScheduledReveal>,
    settled_after_ms: u128,
    section: SectionViewModel,
}

#[derive(Debug, Serialize)]
struct ScheduledReveal {
    item: String,
    title: String,
    delay_ms: u128,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "preview failed");
            eprintln!("showcase: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_tracing(&config);

    let catalog = load_catalog(&cli.catalog)?;
    let content = match &cli.section {
        Some(id) => catalog.section(&SectionId::new(id.as_str())),
        None => catalog.sections.first(),
    }
    .ok_or_else(|| {
        ShowcaseError::Content(format!(
            "section '{}' not found in page '{}'",
            cli.section.as_deref().unwrap_or("<first>"),
            catalog.page
        ))
    })?;

    let section = content.id.clone();
    let element = ElementId::new(format!("{section}-container"));

    let mut page = initialize(&config, ScriptedObserver::default(), ManualTimerHost::default());
    page.mount_content(element.clone(), content)?;

    if let Some(query) = &cli.query {
        page.set_query(&section, query)?;
    }
    if let Some(category) = &cli.category {
        page.set_category(&section, category)?;
    }

    page.on_intersection(&element, 1.0)?;

    let schedule = page
        .section(&section)
        .map(|state| {
            state
                .reveal_schedule()
                .into_iter()
                .map(|entry| scheduled(state.items(), entry))
                .collect()
        })
        .unwrap_or_default();

    let settled_after = page.run_until_idle()?;
    let view = page
        .viewmodel(&section)
        .ok_or_else(|| ShowcaseError::Content(format!("section '{section}' is not mounted")))?;

    let report = Report {
        page: catalog.page.clone(),
        schedule,
        settled_after_ms: settled_after.as_millis(),
        section: view,
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ShowcaseError::Content(format!("failed to serialize report: {e}")))?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    page.unmount(&section);
    Ok(())
}

fn load_catalog(name: &str) -> Result<Catalog> {
    if BUILTIN_CATALOGS.contains(&name) {
        Catalog::builtin(name).ok_or_else(|| ShowcaseError::Content(format!("embedded catalog '{name}' is invalid")))
    } else {
        Catalog::from_file(name)
    }
}

fn scheduled(items: &[showcase::Item], entry: RevealEntry) -> ScheduledReveal {
    let title = items
        .iter()
        .find(|item| item.id == entry.item)
        .map(|item| item.title.clone())
        .unwrap_or_default();

    ScheduledReveal {
        item: entry.item.to_string(),
        title,
        delay_ms: entry.delay.as_millis(),
    }
}

fn print_report(report: &Report) {
    let view = &report.section;
    println!("{} / {}: {}", report.page, view.section, view.header.title);

    let chips: Vec<String> = view
        .chips
        .iter()
        .map(|chip| if chip.is_selected { format!("[{}]", chip.key) } else { chip.key.clone() })
        .collect();
    println!("chips: {}", chips.join(" "));

    if let Some(search) = &view.search_bar {
        println!("query: {:?}", search.query);
    }

    if let Some(empty) = &view.empty_state {
        println!("{} ({})", empty.message, empty.subtitle);
        return;
    }

    for reveal in &report.schedule {
        println!("  +{:>5}ms  {:<24} {}", reveal.delay_ms, reveal.item, reveal.title);
    }
    println!("settled after {}ms", report.settled_after_ms);
}
