use attention_lab::config::{load_config, LabConfig};
use attention_lab::render::VisualEncoding;
use attention_lab::{AttentionLab, LabSnapshot};
use std::error::Error;
use std::fmt::Write as _;
use std::process;
use tracing_subscriber::EnvFilter;

// Scaled dot-product attention lab (educational example).
//
// Usage: attention_lab [config.json] [--sweep DIM] [--json]

const USAGE: &str = "usage: attention_lab [config.json] [--sweep DIM] [--json]";

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<String>,
    sweep: Option<usize>,
    json: bool,
}

// Parse command-line arguments; args[0] is the program name.
fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--sweep" => {
                let raw = iter.next().ok_or("--sweep needs a dimension index")?;
                let dim = raw
                    .parse::<usize>()
                    .map_err(|_| format!("invalid dimension index '{}'", raw))?;
                options.sweep = Some(dim);
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{}'", other));
            }
            path => {
                if options.config_path.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                options.config_path = Some(path.to_string());
            }
        }
    }
    Ok(options)
}

// Load the configuration named on the command line, or the toy lab.
fn config_from_options(options: &CliOptions) -> Result<LabConfig, Box<dyn Error>> {
    match &options.config_path {
        Some(path) => load_config(path),
        None => Ok(LabConfig::toy()),
    }
}

fn format_vector(values: &[f64], precision: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect();
    format!("[{}]", parts.join(", "))
}

// Text rendition of the query, mechanism and output panels.
fn render_panels(snapshot: &LabSnapshot) -> String {
    let encoding = VisualEncoding::from_snapshot(snapshot);
    let mut out = String::new();

    let _ = writeln!(out, "Query (Q): [{}]", encoding.query_labels.join(", "));
    let _ = writeln!(out);
    for (record, row) in snapshot.memory.iter().zip(&encoding.records) {
        let _ = writeln!(
            out,
            "{:<8} key {}  similarity {:>5}  weight {:>4}  value {}",
            row.label,
            format_vector(&record.key, 1),
            row.score_label,
            row.weight_label,
            format_vector(&record.value, 1),
        );
    }
    let _ = writeln!(out);
    let labels: Vec<&str> = encoding.output_bars.iter().map(|b| b.label.as_str()).collect();
    let _ = writeln!(out, "Context vector (output): [{}]", labels.join(", "));
    if let Some(best) = snapshot.best_match() {
        let _ = writeln!(out, "Best match: {}", best.label);
    }
    out
}

// One line of weights per sweep position.
fn render_sweep(frames: &[LabSnapshot], index: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sweeping query dim {}", index + 1);
    for frame in frames {
        let _ = writeln!(
            out,
            "q[{}] = {:.1}  weights {}  output {}",
            index,
            frame.query[index],
            format_vector(&frame.weights, 3),
            format_vector(&frame.output, 2),
        );
    }
    out
}

fn run(options: &CliOptions) -> Result<String, Box<dyn Error>> {
    let config = config_from_options(options)?;
    let mut lab = AttentionLab::from_config(&config)?;

    if let Some(index) = options.sweep {
        let frames = lab.sweep(index, &config.slider_positions())?;
        if options.json {
            return Ok(serde_json::to_string_pretty(&frames)?);
        }
        return Ok(render_sweep(&frames, index));
    }

    let snapshot = lab.snapshot();
    if options.json {
        Ok(snapshot.to_json()?)
    } else {
        Ok(render_panels(&snapshot))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    match run(&options) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    }
}
