use anyhow::Result;
use assurance_harness::chart::{self, CapabilityChart, EfficiencyChart};
use assurance_harness::cli::{Cli, OutputFormat};
use assurance_harness::config::AnalysisConfig;
use assurance_harness::csv_output::CsvOutput;
use assurance_harness::html_output::HtmlOutput;
use assurance_harness::json_output::JsonOutput;
use assurance_harness::report::{analyze, AnalysisReport};
use assurance_harness::{discovery, loader};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve configuration from `--config` and `--threshold`
fn build_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }

    if let Err(e) = config.validate() {
        anyhow::bail!("Invalid value for --threshold: {}", e);
    }
    Ok(config)
}

fn render_report(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => JsonOutput::from_report(report).to_json()? + "\n",
        OutputFormat::Csv => CsvOutput::new(report).to_csv(),
        OutputFormat::Html => HtmlOutput::new(report).to_html(),
    })
}

/// Save the rendered report and chart models under `out_dir`
fn save_outputs(
    out_dir: &Path,
    report: &AnalysisReport,
    rendered: &str,
    format: OutputFormat,
) -> Result<bool> {
    std::fs::create_dir_all(out_dir)?;
    std::fs::write(out_dir.join(format.report_file_name()), rendered)?;

    let agg = &report.aggregation;
    let capability = CapabilityChart::from_rows(&agg.capability, &agg.metadata);
    let efficiency = EfficiencyChart::from_rows(&agg.efficiency, &agg.metadata);
    let written = chart::write_charts(out_dir, capability.as_ref(), efficiency.as_ref())?;

    Ok(!written.is_empty())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    if args.discover {
        println!(
            "{}",
            serde_json::to_string_pretty(&discovery::detect_arch())?
        );
        return Ok(());
    }

    let config = build_config(&args)?;

    let records = match loader::load_results(&args.path, &config) {
        Ok(records) => records,
        Err(e) if e.is_no_data() => {
            println!(
                "No result JSONs found at {}. Expect {} or perf_run_*.json",
                args.path.display(),
                config.aggregate_file
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let report = analyze(&records, config.latency_threshold_us)?;
    let rendered = render_report(&report, args.format)?;
    print!("{}", rendered);

    if let Some(out_dir) = &args.out_dir {
        let charts_written = save_outputs(out_dir, &report, &rendered, args.format)?;
        if charts_written {
            let note = format!("Plots saved under {}/", out_dir.display());
            // Keep machine-readable stdout clean
            if args.format == OutputFormat::Text {
                println!("{}", note);
            } else {
                eprintln!("{}", note);
            }
        }
    }

    Ok(())
}
