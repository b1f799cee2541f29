//! PAC Rules CLI
//!
//! Generates a PAC file from remote and local domain lists, and cleans redundant
//! entries out of the local direct list.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pac_rules::config::{DEFAULT_DIRECT, DEFAULT_PROXY};
use pac_rules::{clean_direct, generate, DedupReport, GeneratorConfig, HttpSource, Result};

#[derive(Parser)]
#[command(name = "pac-rules")]
#[command(about = "Generate a PAC file from China and custom domain lists")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Proxy rule used for proxied domains
    #[arg(long, global = true, default_value = DEFAULT_PROXY)]
    proxy: String,

    /// Direct rule used for direct domains and private addresses
    #[arg(long, global = true, default_value = DEFAULT_DIRECT)]
    direct: String,

    /// Rule for hosts matching nothing (defaults to --proxy)
    #[arg(long, global = true)]
    default: Option<String>,

    /// Do not download the remote domain lists
    #[arg(long, global = true)]
    skip_download: bool,

    /// Drop custom direct domains already covered by the China list
    #[arg(long)]
    check_duplicates: bool,

    /// PAC template file
    #[arg(long, global = true, default_value = "pac-template")]
    template: PathBuf,

    /// Directory holding direct.txt and proxy.txt
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,

    /// Directory the PAC file is written to
    #[arg(long, global = true, default_value = "output")]
    output_dir: PathBuf,

    /// Download timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove entries from direct.txt that the China list already covers
    Clean {
        /// Rewrite without asking
        #[arg(short, long)]
        yes: bool,

        /// Print the redundancy report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("pac_rules=debug")
    } else {
        EnvFilter::new("pac_rules=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();

    let config = build_config(&cli);

    let result = match cli.command {
        None => cmd_generate(&config),
        Some(Commands::Clean { yes, json }) => cmd_clean(&config, yes, json),
    };

    if let Err(e) = result {
        if e.kind().is_fatal() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        warn!("{e}");
    }
}

fn build_config(cli: &Cli) -> GeneratorConfig {
    let mut config = GeneratorConfig::new()
        .with_proxy(&cli.proxy)
        .with_direct(&cli.direct)
        .with_template(&cli.template)
        .with_config_dir(&cli.config_dir)
        .with_output_dir(&cli.output_dir)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_skip_download(cli.skip_download)
        .with_check_duplicates(cli.check_duplicates);
    if let Some(ref default) = cli.default {
        config = config.with_default(default);
    }
    config
}

fn cmd_generate(config: &GeneratorConfig) -> Result<()> {
    println!("Proxy rule:   {}", config.proxy);
    println!("Direct rule:  {}", config.direct);
    println!("Default rule: {}", config.default);

    let summary = generate(config, &HttpSource::new())?;

    println!();
    println!("Local area domains:    {}", summary.local_area);
    println!("China domains:         {}", summary.china);
    println!("Custom direct domains: {}", summary.custom_direct);
    if summary.removed_duplicates > 0 {
        println!("Duplicates removed:    {}", summary.removed_duplicates);
    }
    println!("Direct domains total:  {}", summary.direct_total);
    println!("Proxy domains total:   {}", summary.proxy_total);
    println!("PAC file written to {}", summary.output.display());
    Ok(())
}

fn cmd_clean(config: &GeneratorConfig, yes: bool, json: bool) -> Result<()> {
    let direct_path = config.direct_path();

    let summary = clean_direct(config, &HttpSource::new(), |report| {
        print_report(report);
        yes || ask_confirm(&format!(
            "Remove these domains from {}? (y/n): ",
            direct_path.display()
        ))
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.report)?);
    }

    if summary.rewritten {
        println!(
            "Removed {} domains from {} ({} -> {})",
            summary.removed(),
            direct_path.display(),
            summary.original_count,
            summary.report.residual.len()
        );
    } else if !summary.report.has_redundancy() {
        println!("No redundant domains in {}", direct_path.display());
    }
    Ok(())
}

fn print_report(report: &DedupReport) {
    let mut exact: Vec<&str> = report
        .exact_matches()
        .map(|r| r.rule.original.as_str())
        .collect();
    exact.sort();
    if !exact.is_empty() {
        println!("\nAlready in the China list:");
        for domain in exact {
            println!("- {}", domain);
        }
    }

    let mut children: Vec<String> = report.subdomains().map(|r| r.to_string()).collect();
    children.sort();
    if !children.is_empty() {
        println!("\nCovered by a China list suffix:");
        for line in children {
            println!("- {}", line);
        }
    }
}

fn ask_confirm(prompt: &str) -> bool {
    print!("\n{}", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}
