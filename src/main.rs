use anyhow::anyhow;
use clap::{Arg, Command};
use log::LevelFilter;
use scam_scorer::{AnalysisReport, Lexicon, ScamAnalyzer};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let matches = Command::new("scam-scorer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic scam-probability scoring for emails")
        .arg(
            Arg::new("subject")
                .short('s')
                .long("subject")
                .value_name("TEXT")
                .help("Email subject to analyze"),
        )
        .arg(
            Arg::new("body")
                .short('b')
                .long("body")
                .value_name("TEXT")
                .help("Email body to analyze"),
        )
        .arg(
            Arg::new("sender")
                .short('f')
                .long("sender")
                .value_name("ADDRESS")
                .help("Sender address"),
        )
        .arg(
            Arg::new("lexicon")
                .long("lexicon")
                .value_name("FILE")
                .help("YAML file overriding the built-in lexicon")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Analyze the three built-in sample emails")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit the analysis report as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-feature scores")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let lexicon = match matches.get_one::<String>("lexicon") {
        Some(path) => Lexicon::load_from_file(Path::new(path))
            .map_err(|e| anyhow!("failed to load lexicon from {}: {}", path, e))?,
        None => Lexicon::default_lexicon()?,
    };
    let analyzer = ScamAnalyzer::new(lexicon);
    let as_json = matches.get_flag("json");

    let explicit_email = matches.get_one::<String>("subject").is_some()
        || matches.get_one::<String>("body").is_some()
        || matches.get_one::<String>("sender").is_some();

    if matches.get_flag("demo") || !explicit_email {
        run_demo(&analyzer, as_json)?;
        return Ok(());
    }

    let empty = String::new();
    let subject = matches.get_one::<String>("subject").unwrap_or(&empty);
    let body = matches.get_one::<String>("body").unwrap_or(&empty);
    let sender = matches.get_one::<String>("sender").unwrap_or(&empty);

    let report = analyzer.report(subject, body, sender);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(subject, sender, &report);
    }

    Ok(())
}

/// The three canonical sample emails: legitimate, suspicious, obvious scam.
fn run_demo(analyzer: &ScamAnalyzer, as_json: bool) -> anyhow::Result<()> {
    let samples = [
        (
            "Example 1 (Legitimate)",
            "Team meeting tomorrow",
            "Hi team, Just a reminder that we have our weekly meeting tomorrow \
             at 10am. Please prepare your status updates. Thanks, Manager",
            "manager@company.com",
        ),
        (
            "Example 2 (Suspicious)",
            "URGENT: Your account needs verification",
            "Dear valued customer, We have noticed suspicious activity on your \
             account. Please verify your account by clicking on this link: \
             http://secure-bank-verify.com and enter your account details. Act \
             now to prevent account suspension!",
            "security@bank-secure-verify.com",
        ),
        (
            "Example 3 (Scam)",
            "CONGRATULATIONS! YOU WON $5,000,000 LOTTERY!!!",
            "Dear Lucky Winner, You have been selected to receive $5,000,000 \
             from the International Lottery. To claim your prize, please send \
             your bank account details and a processing fee of $100 via wire \
             transfer to our agent. This is URGENT as your prize will expire \
             in 24 hours! Kindly do the needful.",
            "agent@international-lottery-winner.org",
        ),
    ];

    for (label, subject, body, sender) in samples {
        let report = analyzer.report(subject, body, sender);
        if as_json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("\n{label}");
            print_report(subject, sender, &report);
        }
    }

    Ok(())
}

fn print_report(subject: &str, sender: &str, report: &AnalysisReport) {
    println!("Subject: {subject}");
    println!("From: {sender}");
    println!("Scam probability score: {:.2}", report.score);
    println!("Classification: {}", report.tier);

    if report.indicators.is_empty() {
        println!("No scam indicators found.");
    } else {
        println!("Scam indicators found:");
        for indicator in &report.indicators {
            println!("- {indicator}");
        }
    }
}
