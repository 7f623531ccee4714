//! CLI entry point for the decade-sim binary.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;

use decade_cli::render::glyph;
use decade_cli::trace::{format_row, RowCollector, TABLE_HEADER};
use decade_cli::waveform::{write_vcd, WaveSample};
use decade_core::{decode, DecadeCounter, Digit, PinOutputs, TickInputs};
#[cfg(test)]
use tempfile as _;
use vcd as _;

const USAGE_TEXT: &str = "\
Usage: decade-sim <command> [options]

Commands:
  run  [options]       Drive the counter and print a per-edge trace
  show <digit>         Render one digit as a seven-segment glyph

Options (run):
  --ticks <n>        Clock edges to apply after reset release (default: 12)
  --reset-ticks <n>  Edges to hold reset asserted first (default: 10)
  --hold             Keep enable low after reset release
  --vcd <file>       Write a VCD waveform of the run
  -q, --quiet        Suppress the per-edge table
  -h, --help         Show this help message

Examples:
  decade-sim run --ticks 25
  decade-sim run --vcd counter.vcd --quiet
  decade-sim show 7
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(RunArgs),
    Show(ShowArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    ticks: u64,
    reset_ticks: u64,
    hold: bool,
    vcd: Option<PathBuf>,
    quiet: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            ticks: 12,
            reset_ticks: 10,
            hold: false,
            vcd: None,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShowArgs {
    digit: u8,
}

#[derive(Debug)]
enum ParseResult {
    Command(Command),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParseResult::Help);
    }

    let command_str = first.to_string_lossy().to_string();

    match command_str.as_str() {
        "run" => parse_run_args(args)
            .map(Command::Run)
            .map(ParseResult::Command),
        "show" => parse_show_args(args)
            .map(Command::Show)
            .map(ParseResult::Command),
        other => Err(format!("unknown command: {other}")),
    }
}

#[allow(clippy::while_let_on_iterator)]
fn parse_run_args(mut args: impl Iterator<Item = OsString>) -> Result<RunArgs, String> {
    let mut parsed = RunArgs::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg == "--hold" {
            parsed.hold = true;
            continue;
        }

        if arg == "--quiet" || arg == "-q" {
            parsed.quiet = true;
            continue;
        }

        if arg == "--ticks" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --ticks".to_string())?;
            parsed.ticks = parse_count(&value, "--ticks")?;
            continue;
        }

        if arg == "--reset-ticks" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --reset-ticks".to_string())?;
            parsed.reset_ticks = parse_count(&value, "--reset-ticks")?;
            continue;
        }

        if arg == "--vcd" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --vcd".to_string())?;
            parsed.vcd = Some(PathBuf::from(value));
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        return Err(format!("unexpected argument: {}", arg.to_string_lossy()));
    }

    Ok(parsed)
}

fn parse_show_args(args: impl Iterator<Item = OsString>) -> Result<ShowArgs, String> {
    let mut digit: Option<u8> = None;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if digit.is_some() {
            return Err("multiple digits provided".to_string());
        }

        let parsed = arg
            .to_string_lossy()
            .parse::<u8>()
            .map_err(|e| format!("invalid digit: {e}"))?;
        digit = Some(parsed);
    }

    let digit = digit.ok_or_else(|| "missing digit".to_string())?;
    Ok(ShowArgs { digit })
}

fn parse_count(value: &OsStr, option: &str) -> Result<u64, String> {
    value
        .to_string_lossy()
        .parse::<u64>()
        .map_err(|e| format!("invalid value for {option}: {e}"))
}

fn drive(
    core: &mut DecadeCounter,
    inputs: TickInputs,
    collector: &mut RowCollector,
    samples: &mut Vec<WaveSample>,
) {
    let sampled = core.tick_traced(inputs, collector);
    samples.push(WaveSample { inputs, sampled });
}

fn run_run(args: RunArgs) -> Result<(), i32> {
    let mut core = DecadeCounter::new();
    let mut collector = RowCollector::new();
    let mut samples = Vec::new();

    for _ in 0..args.reset_ticks {
        drive(&mut core, TickInputs::reset(), &mut collector, &mut samples);
    }

    let active = if args.hold {
        TickInputs::idle()
    } else {
        TickInputs::counting()
    };
    for _ in 0..args.ticks {
        drive(&mut core, active, &mut collector, &mut samples);
    }

    if !args.quiet {
        println!("{TABLE_HEADER}");
        for row in collector.rows() {
            println!("{}", format_row(row));
        }
        println!();
    }

    println!(
        "Ran {} edges ({} reset, {} active); settled on digit {}",
        core.edges(),
        args.reset_ticks,
        args.ticks,
        core.digit()
    );
    println!("{}", glyph(core.outputs().segments()));

    if let Some(path) = args.vcd {
        let file = match fs::File::create(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("error: failed to create {}: {e}", path.display());
                return Err(1);
            }
        };
        if let Err(e) = write_vcd(BufWriter::new(file), &samples) {
            eprintln!("error: failed to write waveform: {e}");
            return Err(1);
        }
        println!("Wrote waveform to {}", path.display());
    }

    Ok(())
}

fn run_show(args: ShowArgs) -> Result<(), i32> {
    let digit = match Digit::try_from(args.digit) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    let pattern = decode(digit);
    let outputs = PinOutputs::from_pattern(pattern);
    println!("digit {digit}");
    println!("bus   0x{:02X} ({pattern})", outputs.output_bus);
    println!("{}", glyph(pattern));

    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(Command::Run(args))) => match run_run(args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Show(args))) => match run_show(args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            if error.starts_with("Usage:") {
                println!("{error}");
            } else {
                eprintln!("error: {error}");
                eprintln!("{USAGE_TEXT}");
            }
            1
        }
    };

    std::process::exit(exit_code);
}
