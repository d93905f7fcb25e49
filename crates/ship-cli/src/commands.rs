use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::{CsvWriter, SerWriter};
use tracing::{info, info_span, warn};

use ship_cli::config::Settings;
use ship_cli::session::Session;
use ship_compliance::{
    ApprovedCarriers, DelayStats, KeyMetrics, check_carriers, check_compliance,
    delayed_shipments, render_alert,
};
use ship_geo::{analyze_routes, analyze_timeline, validate_geographic_data};
use ship_ingest::build_quality_report;
use ship_map::{MappingConfig, suggest, validate_required};

use crate::cli::{
    AlertArgs, AskArgs, CarrierAction, CarriersArgs, ComplianceArgs, ConfigAction, ConfigArgs,
    GeocodeArgs, InspectArgs, ManifestArgs, RoutesArgs,
};
use crate::summary::{
    print_carriers, print_compliance, print_geocode, print_mapping, print_metrics,
    print_quality, print_routes, print_timeline,
};

/// Loads the manifest and applies any saved mapping and overrides.
fn open_session(settings: Settings, input: &ManifestArgs) -> Result<Session> {
    let mut session = Session::from_settings(settings);
    session.load_file(&input.manifest)?;
    if let Some(path) = &input.mapping {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config = MappingConfig::from_json(&text)?;
        session.apply_mapping_config(&config)?;
    }
    for (field, column) in &input.overrides {
        session
            .override_mapping(*field, column)
            .with_context(|| format!("map {field} to '{column}'"))?;
    }
    Ok(session)
}

fn warn_missing_required(session: &Session) {
    let Some(manifest) = session.manifest() else {
        return;
    };
    let (valid, missing) = validate_required(&manifest.mapping, &session.settings().required_fields);
    if !valid {
        let names: Vec<&str> = missing.iter().map(|field| field.display_name()).collect();
        warn!(missing = %names.join(", "), "Required fields are not mapped");
    }
}

pub fn run_inspect(settings: Settings, args: &InspectArgs) -> Result<()> {
    let span = info_span!("inspect", manifest = %args.input.manifest.display());
    let _guard = span.enter();
    let session = open_session(settings, &args.input)?;
    let Some(manifest) = session.manifest() else {
        bail!("no manifest loaded");
    };
    let columns = manifest.columns();
    let suggestions = suggest(&columns, &manifest.mapping);
    let (_, missing) = validate_required(&manifest.mapping, &session.settings().required_fields);
    print_mapping(manifest, &suggestions, &missing);
    print_quality(&build_quality_report(&manifest.data), !args.no_profile);
    print_metrics(&KeyMetrics::compute(&manifest.data, &manifest.mapping));

    if let Some(path) = &args.save_mapping {
        let json = MappingConfig::from_mapping(&manifest.mapping).to_json()?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        println!("Mapping saved to {}", path.display());
    }
    Ok(())
}

pub fn run_ask(settings: Settings, args: &AskArgs) -> Result<()> {
    let span = info_span!("ask", manifest = %args.input.manifest.display());
    let _guard = span.enter();
    let mut session = open_session(settings, &args.input)?;
    for question in &args.questions {
        let answer = session.ask(question)?;
        if args.questions.len() > 1 {
            println!("Q: {question}");
        }
        println!("{}", answer.text);
        if args.questions.len() > 1 {
            println!();
        }
    }
    if let Some(path) = &args.history {
        session.export_history(path)?;
        println!("History saved to {}", path.display());
    }
    Ok(())
}

pub fn run_summarize(settings: Settings, args: &ManifestArgs) -> Result<()> {
    let span = info_span!("summarize", manifest = %args.manifest.display());
    let _guard = span.enter();
    let session = open_session(settings, args)?;
    println!("{}", session.summarize()?);
    Ok(())
}

pub fn run_compliance(settings: Settings, args: &ComplianceArgs) -> Result<bool> {
    let span = info_span!("compliance", manifest = %args.input.manifest.display());
    let _guard = span.enter();
    let carriers_path = args
        .carriers
        .clone()
        .unwrap_or_else(|| settings.carriers_path());
    let session = open_session(settings, &args.input)?;
    warn_missing_required(&session);
    let Some(manifest) = session.manifest() else {
        bail!("no manifest loaded");
    };
    let approved = ApprovedCarriers::load(&carriers_path);
    if approved.is_empty() {
        warn!(path = %carriers_path.display(), "No approved carriers, every carrier will be flagged");
    }
    let report = check_compliance(&manifest.data, &manifest.mapping, &approved);
    let carriers = check_carriers(&manifest.data, &manifest.mapping, &approved);
    info!(issues = report.issues.len(), "Compliance check finished");
    print_compliance(&report, carriers.as_ref());
    Ok(report.is_clean())
}

pub fn run_carriers(settings: &Settings, args: &CarriersArgs) -> Result<()> {
    let path = args
        .carriers
        .clone()
        .unwrap_or_else(|| settings.carriers_path());
    let span = info_span!("carriers", path = %path.display());
    let _guard = span.enter();
    let mut approved = ApprovedCarriers::load(&path);
    let changed = match &args.action {
        CarrierAction::List => false,
        CarrierAction::Add { names } => {
            for name in names {
                if !approved.add(name) {
                    println!("'{}' is already approved.", name.trim());
                }
            }
            true
        }
        CarrierAction::Remove { names } => {
            for name in names {
                if !approved.remove(name) {
                    println!("'{}' is not on the list.", name.trim());
                }
            }
            true
        }
        CarrierAction::Reset => {
            approved = ApprovedCarriers::defaults();
            true
        }
    };
    if changed {
        approved.save(&path)?;
    }
    print_carriers(approved.as_slice());
    Ok(())
}

pub fn run_geocode(settings: Settings, args: &GeocodeArgs) -> Result<()> {
    let span = info_span!("geocode", manifest = %args.input.manifest.display());
    let _guard = span.enter();
    let mut session = open_session(settings, &args.input)?;
    let summary = session.geocode(args.offline)?;
    print_geocode(&summary);
    let Some(manifest) = session.manifest() else {
        bail!("no manifest loaded");
    };
    if !validate_geographic_data(&manifest.data) {
        warn!("Fewer than half of the rows have both origin and destination coordinates");
    }
    if let Some(path) = &args.output {
        write_csv(&manifest.data, path)?;
        println!("Enriched manifest saved to {}", path.display());
    }
    Ok(())
}

fn write_csv(df: &polars::prelude::DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn run_routes(settings: Settings, args: &RoutesArgs) -> Result<()> {
    let span = info_span!("routes", manifest = %args.input.manifest.display());
    let _guard = span.enter();
    let mut session = open_session(settings, &args.input)?;
    warn_missing_required(&session);
    let summary = session.geocode(args.offline)?;
    info!(summary = %summary.describe(), "Coordinates ready");
    let Some(manifest) = session.manifest() else {
        bail!("no manifest loaded");
    };
    if !validate_geographic_data(&manifest.data) {
        warn!("Fewer than half of the rows have both origin and destination coordinates");
    }
    let report = analyze_routes(&manifest.data, &manifest.mapping)?;
    print_routes(&report, args.top);
    Ok(())
}

pub fn run_timeline(settings: Settings, args: &ManifestArgs) -> Result<()> {
    let span = info_span!("timeline", manifest = %args.manifest.display());
    let _guard = span.enter();
    let session = open_session(settings, args)?;
    let Some(manifest) = session.manifest() else {
        bail!("no manifest loaded");
    };
    let report = analyze_timeline(&manifest.data, &manifest.mapping)?;
    print_timeline(&report);
    Ok(())
}

pub fn run_alerts(settings: Settings, args: &AlertArgs) -> Result<()> {
    let span = info_span!("alerts", manifest = %args.input.manifest.display());
    let _guard = span.enter();
    let session = open_session(settings, &args.input)?;
    let Some(manifest) = session.manifest() else {
        bail!("no manifest loaded");
    };
    let delayed = delayed_shipments(&manifest.data, &manifest.mapping)?;
    let stats = DelayStats::compute(&delayed, manifest.data.height());
    info!(
        delayed = stats.delayed,
        total = stats.total,
        "Delayed shipments collected"
    );
    println!("{}", render_alert(&delayed, args.tone.into()));
    if stats.delayed > 0 {
        println!(
            "Delayed: {} of {} ({:.1}%)",
            stats.delayed, stats.total, stats.percentage
        );
        for (carrier, count) in &stats.by_carrier {
            println!("- {carrier}: {count}");
        }
    }
    Ok(())
}

pub fn run_config(path: &Path, settings: &Settings, args: &ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let text = toml::to_string_pretty(settings).context("serialize settings")?;
            print!("{text}");
            println!(
                "# language model: {}",
                if settings.api_key.is_some() {
                    "API key set"
                } else {
                    "no API key"
                }
            );
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to replace it)",
                    path.display()
                );
            }
            Settings::default().save_to(path)?;
            println!("Settings written to {}", path.display());
        }
    }
    Ok(())
}
