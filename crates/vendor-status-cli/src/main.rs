//! `vendor-status`: classify vendor availability from offer state JSON.
//!
//! Reads a JSON array of vendor offer states, prints the classification as
//! JSON on stdout. Diagnostics go to stderr (see `logging`).

mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::Parser;
use serde_json::{Value, json};
use vendor_status_core::domain::parse_until;
use vendor_status_core::{
    ClassifierBuilder, Clock, DerivationRules, FixedClock, StatusCounts, SystemClock,
    VendorOfferState,
};

#[derive(Parser)]
#[command(
    name = "vendor-status",
    version,
    about = "Classify vendor availability from vendor/offer state"
)]
struct Cli {
    /// JSON array of vendor offer states. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// TOML file overriding the derivation rules.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Evaluate at this instant (ISO-8601 with offset) instead of now.
    #[arg(long, value_parser = parse_until)]
    now: Option<DateTime<FixedOffset>>,

    /// Print facts and decision path for every vendor.
    #[arg(long)]
    explain: bool,

    /// Wrap the output with per-status counts.
    #[arg(long)]
    summary: bool,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let rules = load_rules(cli.rules.as_deref())?;
    let raws = parse_records(&read_input(cli.input.as_deref())?)?;

    let output = match cli.now {
        Some(now) => classify(FixedClock::new(now), rules, &raws, &cli)?,
        None => classify(SystemClock, rules, &raws, &cli)?,
    };
    let rendered = serde_json::to_string_pretty(&output).context("serialize output")?;
    println!("{rendered}");
    Ok(())
}

fn load_rules(path: Option<&Path>) -> Result<DerivationRules> {
    let Some(path) = path else {
        return Ok(DerivationRules::default());
    };
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    DerivationRules::from_toml_str(&contents).with_context(|| format!("parse {}", path.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("read stdin")?;
            Ok(buf)
        }
    }
}

fn parse_records(contents: &str) -> Result<Vec<VendorOfferState>> {
    serde_json::from_str(contents).context("parse vendor offer states")
}

fn classify<C: Clock>(
    clock: C,
    rules: DerivationRules,
    raws: &[VendorOfferState],
    cli: &Cli,
) -> Result<Value> {
    let classifier = ClassifierBuilder::new(clock)
        .rules(rules)
        .build()
        .context("build classifier")?;

    let (body, counts) = if cli.explain {
        let explanations = classifier.explain_all(raws).context("classify vendors")?;
        let mut counts = StatusCounts::default();
        for e in &explanations {
            counts.record(e.status);
        }
        (serde_json::to_value(explanations)?, counts)
    } else {
        let results = classifier.run(raws).context("classify vendors")?;
        let counts = StatusCounts::from_results(&results);
        (serde_json::to_value(results)?, counts)
    };

    if cli.summary {
        Ok(json!({ "results": body, "summary": counts }))
    } else {
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("vendor-status").chain(args.iter().copied()))
    }

    const ONE_VENDOR: &str = r#"[{
        "id": 9,
        "vendorInfo": { "id": 9, "delivery": { "type": "OWN_DELIVERY", "modes": ["DELIVERY"] } },
        "offerVendor": { "vendorId": 9, "state": { "status": "OPEN" } }
    }]"#;

    #[test]
    fn parses_now_with_offset() {
        let c = cli(&["--now", "2023-06-30T10:00:00+02:00", "-"]);
        assert_eq!(c.now.unwrap().to_rfc3339(), "2023-06-30T10:00:00+02:00");
        assert_eq!(c.input.as_deref(), Some(Path::new("-")));
    }

    #[test]
    fn rejects_now_without_offset() {
        let parsed = Cli::try_parse_from(["vendor-status", "--now", "2023-06-30T10:00:00"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn plain_output_is_a_result_array() {
        let raws = parse_records(ONE_VENDOR).unwrap();
        let out = classify(SystemClock, DerivationRules::default(), &raws, &cli(&[])).unwrap();
        assert_eq!(out, json!([{ "id": 9, "status": "DELIVERY_ONLINE" }]));
    }

    #[test]
    fn summary_wraps_results() {
        let raws = parse_records(ONE_VENDOR).unwrap();
        let out = classify(
            SystemClock,
            DerivationRules::default(),
            &raws,
            &cli(&["--summary", "--explain"]),
        )
        .unwrap();
        assert_eq!(out["summary"]["total"], 1);
        assert_eq!(out["summary"]["by_status"]["DELIVERY_ONLINE"], 1);
        assert_eq!(out["results"][0]["path"][0]["fact"], "IsOpen");
        assert_eq!(out["results"][0]["facts"]["is_delivery"], true);
    }

    #[test]
    fn missing_rules_file_is_reported() {
        let err = load_rules(Some(Path::new("/nonexistent/rules.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/rules.toml"));
    }

    #[test]
    fn malformed_input_is_reported() {
        let err = parse_records("{ not json").unwrap_err();
        assert!(format!("{err:#}").contains("parse vendor offer states"));
    }
}
