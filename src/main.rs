use anyhow::Context;
use clap::Parser;
use price_scout::core::search::render_results;
use price_scout::core::{ConfigProvider, Storage};
use price_scout::utils::error::ErrorSeverity;
use price_scout::utils::{logger, validation::Validate};
use price_scout::{CliConfig, IngestReport, LocalStorage, PriceEngine, PriceError, TomlConfig};
use std::io::{self, BufRead, Write};

const EXIT_COMMAND: &str = "exit";

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting price-scout");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            run(config)
        }
        None => run(cli),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "price-scout failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run<C: ConfigProvider + Validate>(config: C) -> Result<(), PriceError> {
    config.validate()?;

    let mut engine = PriceEngine::new(LocalStorage::default(), config);
    let report = engine.load_prices()?;
    print_load_summary(&report);

    let stdin = io::stdin();
    interactive_session(&engine, stdin.lock(), io::stdout())?;

    let summary = engine.export_to_html()?;
    println!(
        "Exported {} entries to {}",
        summary.rows,
        summary.path.display()
    );
    Ok(())
}

/// Reads one query per line until `exit` or end of input.
fn interactive_session<S, C, R, W>(
    engine: &PriceEngine<S, C>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    S: Storage,
    C: ConfigProvider,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(
            output,
            "Enter a product name to search (or '{}' to quit): ",
            EXIT_COMMAND
        )?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let query = line?;
        let query = query.trim();
        if query.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }

        let results = engine.find_text(query);
        write!(output, "{}", render_results(&results))?;
    }

    writeln!(output, "Session finished.")?;
    Ok(())
}

fn print_load_summary(report: &IngestReport) {
    println!(
        "Loaded {} entries from {} files ({} rows skipped)",
        report.accepted_total(),
        report.files.len(),
        report.skipped_total()
    );
    for file in report.rejected_files() {
        println!("  skipped file {}: delimiter not detected", file.file);
    }
}
