//! Process command - extract salary fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use taxdoc_core::{
    compare, ConfidenceLevel, DocumentKind, DocumentSource, ExtractionReport, PureOcrEngine,
    SalaryResolver, TaxInput,
};

use super::compare::format_comparison_text;
use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// OCR model directory (det.onnx, latin_rec.onnx, latin_dict.txt)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Skip OCR and use only PDF text extraction
    #[arg(long)]
    text_only: bool,

    /// Also compare tax liability under both regimes
    #[arg(long)]
    compare: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let kind = DocumentKind::from_path(&args.input)?;
    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(10);

    let data = fs::read(&args.input)?;

    // OCR is only loaded when the input can need it.
    let ocr = match (kind, args.text_only) {
        (DocumentKind::Pdf, true) => None,
        _ => load_ocr_engine(&args, &pb)?,
    };

    pb.set_message("Extracting text...");
    pb.set_position(40);

    let mut source = DocumentSource::new(config.pdf.clone());
    if let Some(engine) = &ocr {
        source = source.with_ocr(engine);
    }
    let text = source.extract_text(&data, kind)?;

    debug!("Extracted {} characters of text", text.len());

    pb.set_message("Resolving salary fields...");
    pb.set_position(70);

    let resolver = SalaryResolver::new().with_config(config.extraction.clone());
    let report = resolver.resolve_report(&text);

    pb.set_position(100);
    pb.finish_and_clear();

    let output = format_report(&report, args.format, args.compare)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    print_confidence(&report);

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn load_ocr_engine(
    args: &ProcessArgs,
    pb: &ProgressBar,
) -> anyhow::Result<Option<PureOcrEngine>> {
    let Some(model_dir) = &args.model_dir else {
        return Ok(None);
    };

    if !model_dir.join("det.onnx").exists() {
        anyhow::bail!(
            "OCR models not found at {}. Expected det.onnx, latin_rec.onnx and latin_dict.txt.",
            model_dir.display()
        );
    }

    pb.set_message("Loading OCR models...");
    pb.set_position(20);

    let engine = PureOcrEngine::from_dir(model_dir)
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;

    Ok(Some(engine))
}

fn print_confidence(report: &ExtractionReport) {
    let percent = report.confidence * 100.0;

    match report.confidence_level {
        ConfidenceLevel::Low => eprintln!(
            "{} Low extraction confidence ({:.0}%). Please verify the values or enter them manually.",
            style("✗").red(),
            percent
        ),
        ConfidenceLevel::Medium => eprintln!(
            "{} Medium extraction confidence ({:.0}%). Please review the extracted values.",
            style("!").yellow(),
            percent
        ),
        ConfidenceLevel::High => eprintln!(
            "{} High extraction confidence ({:.0}%).",
            style("✓").green(),
            percent
        ),
    }

    if !report.estimated_fields.is_empty() {
        eprintln!(
            "{} Estimated from related fields: {}",
            style("ℹ").blue(),
            report.estimated_fields.join(", ")
        );
    }

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
}

fn format_report(
    report: &ExtractionReport,
    format: OutputFormat,
    with_comparison: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            if with_comparison {
                let comparison = compare(&TaxInput::from(&report.record));
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "report": report,
                    "comparison": comparison,
                }))?)
            } else {
                Ok(serde_json::to_string_pretty(report)?)
            }
        }
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => {
            let mut output = format_text(report);
            if with_comparison {
                let comparison = compare(&TaxInput::from(&report.record));
                output.push('\n');
                output.push_str(&format_comparison_text(&comparison));
            }
            Ok(output)
        }
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value"])?;
    for (name, value) in report.record.fields() {
        wtr.write_record([name, &value.to_string()])?;
    }
    wtr.write_record(["confidence", &format!("{:.4}", report.confidence)])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ExtractionReport) -> String {
    let mut output = String::new();

    output.push_str("Extracted salary fields:\n");
    for (name, value) in report.record.fields() {
        output.push_str(&format!("  {:<20} {}\n", name, value));
    }

    output
}
