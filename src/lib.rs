//! Bboxes: bounding box conversion between computer-vision conventions.
//!
//! Bboxes converts axis-aligned boxes between VOC, COCO, YOLO,
//! Albumentations, FiftyOne and center-based coordinates. Every format
//! converts through one canonical box (absolute corners), so N formats
//! need N converters instead of N×N.
//!
//! # Modules
//!
//! - [`boxes`]: Canonical box, format boxes, validation and batch construction
//! - [`error`]: Error types for bboxes operations

pub mod boxes;
pub mod error;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use boxes::{AnyBox, BBoxXYXY, BoxFormat, BoxOptions, ImageSize, OobState};
pub use error::BBoxError;

/// The bboxes CLI application.
#[derive(Parser)]
#[command(name = "bboxes")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert boxes from one format to another.
    Convert(ConvertArgs),
    /// Compare two boxes (intersection, union, IoU, center distance).
    Compare(CompareArgs),
    /// Clamp, scale and/or shift a box.
    Transform(TransformArgs),
}

/// Image context shared by all subcommands.
#[derive(clap::Args)]
struct ContextArgs {
    /// Image size as WIDTHxHEIGHT.
    #[arg(long, env = "BBOXES_IMAGE_SIZE")]
    image_size: Option<ImageSize>,

    /// Reject boxes that leave the image instead of flagging them.
    #[arg(long)]
    strict: bool,
}

impl ContextArgs {
    fn options(&self) -> BoxOptions {
        BoxOptions {
            image_size: self.image_size,
            strict: self.strict,
        }
    }
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Source format (voc, coco, center_xywh, yolo, albumentations, fiftyone).
    #[arg(long)]
    from: BoxFormat,

    /// Target format.
    #[arg(long)]
    to: BoxFormat,

    #[command(flatten)]
    context: ContextArgs,

    /// Read a nested JSON array of boxes from FILE ('-' for stdin).
    #[arg(long, conflicts_with = "values")]
    input: Option<PathBuf>,

    /// Print target values without validating the converted box.
    #[arg(long)]
    values_only: bool,

    /// Output format for the result ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// The four box values in the source format.
    #[arg(
        num_args = 4,
        value_name = "VALUE",
        allow_negative_numbers = true,
        required_unless_present = "input"
    )]
    values: Vec<f64>,
}

/// Arguments for the compare subcommand.
#[derive(clap::Args)]
struct CompareArgs {
    /// Format of both boxes.
    #[arg(long, default_value = "voc")]
    format: BoxFormat,

    #[command(flatten)]
    context: ContextArgs,

    /// First box as comma-separated values.
    #[arg(long, value_parser = parse_box_values, allow_hyphen_values = true)]
    a: [f64; 4],

    /// Second box as comma-separated values.
    #[arg(long, value_parser = parse_box_values, allow_hyphen_values = true)]
    b: [f64; 4],

    /// Output format for the result ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the transform subcommand.
///
/// Transforms run in the order clamp, scale, shift.
#[derive(clap::Args)]
struct TransformArgs {
    /// Format of the box.
    #[arg(long)]
    format: BoxFormat,

    #[command(flatten)]
    context: ContextArgs,

    /// Clamp the box to the image borders.
    #[arg(long)]
    clamp: bool,

    /// Scale width and height by this factor (top-left corner stays fixed).
    #[arg(long)]
    scale: Option<f64>,

    /// Shift by DX,DY (pixels, or image fractions for normalized formats).
    #[arg(long, value_parser = parse_shift, allow_hyphen_values = true)]
    shift: Option<(f64, f64)>,

    /// Output format for the result ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// The four box values.
    #[arg(
        num_args = 4,
        value_name = "VALUE",
        allow_negative_numbers = true,
        required = true
    )]
    values: Vec<f64>,
}

/// Machine-readable description of one box.
#[derive(Serialize)]
struct BoxReport {
    format: BoxFormat,
    values: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical: Option<BBoxXYXY>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_size: Option<ImageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    oob: Option<OobState>,
}

impl From<&AnyBox> for BoxReport {
    fn from(bbox: &AnyBox) -> Self {
        Self {
            format: bbox.format(),
            values: bbox.values(),
            canonical: Some(*bbox.canonical()),
            image_size: bbox.image_size(),
            oob: Some(bbox.oob()),
        }
    }
}

/// Run the bboxes CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BBoxError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Compare(args)) => run_compare(args),
        Some(Commands::Transform(args)) => run_transform(args),
        None => {
            // No subcommand: just print a help hint and exit successfully
            println!("bboxes {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Bounding box conversion between computer-vision formats.");
            println!();
            println!("Run 'bboxes --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    // A logger may already be installed when embedded; keep the existing one.
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), BBoxError> {
    let options = args.context.options();

    let sources: Vec<AnyBox> = match &args.input {
        Some(path) => {
            let value: serde_json::Value = serde_json::from_str(&read_input(path)?)?;
            AnyBox::from_nested(args.from, &value, options)?.into_items()
        }
        None => vec![AnyBox::from_raw(args.from, to_array(&args.values)?, options)?],
    };

    let reports = sources
        .iter()
        .map(|source| {
            if args.values_only {
                Ok(BoxReport {
                    format: args.to,
                    values: source.convert_values(args.to)?,
                    canonical: None,
                    image_size: None,
                    oob: None,
                })
            } else {
                Ok(BoxReport::from(&source.convert(args.to)?))
            }
        })
        .collect::<Result<Vec<_>, BBoxError>>()?;

    match args.output.as_str() {
        "json" => {
            let json = if args.input.is_some() {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string_pretty(&reports[0])?
            };
            println!("{}", json);
        }
        _ => {
            for report in &reports {
                print_report(report);
            }
        }
    }

    Ok(())
}

/// Execute the compare subcommand.
fn run_compare(args: CompareArgs) -> Result<(), BBoxError> {
    let options = args.context.options();
    let a = AnyBox::from_raw(args.format, args.a, options)?;
    let b = AnyBox::from_raw(args.format, args.b, options)?;

    let intersection = a.intersection(&b);
    let union = a.union(&b);
    let iou = a.iou(&b);
    let distance = a.distance(&b);

    match args.output.as_str() {
        "json" => {
            let json = serde_json::json!({
                "intersection": intersection,
                "union": union,
                "iou": iou,
                "distance": distance,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("intersection: {}", intersection);
            println!("union: {}", union);
            println!("iou: {:.6}", iou);
            println!("distance: {}", distance);
        }
    }

    Ok(())
}

/// Execute the transform subcommand.
fn run_transform(args: TransformArgs) -> Result<(), BBoxError> {
    let mut bbox = AnyBox::from_raw(
        args.format,
        to_array(&args.values)?,
        args.context.options(),
    )?;

    if args.clamp {
        bbox = bbox.clamp()?;
    }
    if let Some(factor) = args.scale {
        bbox = bbox.scale(factor)?;
    }
    if let Some((dx, dy)) = args.shift {
        bbox = bbox.shift(dx, dy)?;
    }

    let report = BoxReport::from(&bbox);
    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &BoxReport) {
    let values = report
        .values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    match report.oob {
        Some(oob) => println!("{}: {} (oob: {})", report.format, values, oob),
        None => println!("{}: {}", report.format, values),
    }
}

fn read_input(path: &Path) -> Result<String, BBoxError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn to_array(values: &[f64]) -> Result<[f64; 4], BBoxError> {
    <[f64; 4]>::try_from(values).map_err(|_| {
        BBoxError::shape(format!("expected 4 box values, got {}", values.len()))
    })
}

fn parse_numbers(s: &str) -> Result<Vec<f64>, String> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", part.trim()))
        })
        .collect()
}

fn parse_box_values(s: &str) -> Result<[f64; 4], String> {
    let numbers = parse_numbers(s)?;
    <[f64; 4]>::try_from(numbers.as_slice())
        .map_err(|_| format!("expected 4 comma-separated values, got {}", numbers.len()))
}

fn parse_shift(s: &str) -> Result<(f64, f64), String> {
    match parse_numbers(s)?.as_slice() {
        [dx, dy] => Ok((*dx, *dy)),
        other => Err(format!("expected DX,DY, got {} value(s)", other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_box_values() {
        assert_eq!(parse_box_values("1, 2,3,4").unwrap(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(parse_box_values("-1,0,3,4").unwrap(), [-1.0, 0.0, 3.0, 4.0]);
        assert!(parse_box_values("1,2,3").is_err());
        assert!(parse_box_values("1,2,x,4").is_err());
    }

    #[test]
    fn test_parse_shift() {
        assert_eq!(parse_shift("0.1,-0.2").unwrap(), (0.1, -0.2));
        assert!(parse_shift("1").is_err());
    }

    #[test]
    fn test_to_array() {
        assert_eq!(to_array(&[1.0, 2.0, 3.0, 4.0]).unwrap(), [1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(to_array(&[1.0]), Err(BBoxError::Shape { .. })));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
