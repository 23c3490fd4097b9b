//! Dipole - passive circuit and filter analysis
//!
//! # Usage
//!
//! ```bash
//! dipole show "Ser(S1, Res(R1, 1k), Cap(C1, 100n))" --frequency 1k
//! dipole bode "RLC(100, 1u, 10m, bandpass)" --points 200 -o bandpass.csv
//! dipole rc --cutoff 4560 --capacitance 330n --kind highpass
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dipole_core::{
    dsl::{self, Expr},
    error::Result,
    output, sweep, voltage_divider, BodeDiagram, Filter, RcFilter, RcKind, SweepConfig,
    DEFAULT_POINT_COUNT, DEFAULT_START_HZ, DEFAULT_STOP_HZ,
};
use num_complex::Complex64;

/// Passive circuit and filter analysis
#[derive(Parser, Debug)]
#[command(name = "dipole", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an element or filter with its DC resistance and impedance
    Show {
        #[command(flatten)]
        source: Source,

        /// Current through the element (A), prints U = R·I
        #[arg(long, value_parser = parse_quantity)]
        current: Option<f64>,

        /// Frequency at which to evaluate impedance or transfer function (Hz)
        #[arg(long, value_parser = parse_quantity)]
        frequency: Option<f64>,
    },

    /// Sample a filter's frequency response as CSV
    Bode {
        #[command(flatten)]
        source: Source,

        /// First sampled frequency (Hz)
        #[arg(long, default_value_t = DEFAULT_START_HZ, value_parser = parse_quantity)]
        start: f64,

        /// Upper bound of the sweep (Hz), not itself sampled
        #[arg(long, default_value_t = DEFAULT_STOP_HZ, value_parser = parse_quantity)]
        stop: f64,

        /// Number of samples
        #[arg(long, default_value_t = DEFAULT_POINT_COUNT)]
        points: usize,

        /// Also write characteristic-frequency markers as CSV to this file
        #[arg(long, value_name = "FILE")]
        markers: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print a filter's characteristic frequencies, one per line
    Freqs {
        #[command(flatten)]
        source: Source,
    },

    /// Design an RC filter for a cutoff frequency
    Rc {
        /// Target cutoff frequency (Hz)
        #[arg(long, value_parser = parse_quantity)]
        cutoff: f64,

        /// Capacitance (F)
        #[arg(long, value_parser = parse_quantity)]
        capacitance: f64,

        /// Filter kind
        #[arg(long, default_value = "lowpass")]
        kind: RcKind,
    },

    /// Synthesize a resistive voltage divider
    Divider {
        /// Input voltage (V)
        #[arg(long, value_parser = parse_quantity)]
        uin: f64,

        /// Desired output voltage (V)
        #[arg(long, value_parser = parse_quantity)]
        ux: f64,

        /// Upper resistor (Ω)
        #[arg(long, value_parser = parse_quantity)]
        r1: f64,
    },
}

/// Circuit notation, given inline or read from a file.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Circuit notation, e.g. "RC(1k, 100n, lowpass)"
    #[arg(value_name = "EXPR")]
    expr: Option<String>,

    /// Read the circuit notation from a file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

impl Source {
    fn read(&self) -> Result<String> {
        match (&self.expr, &self.file) {
            (Some(expr), _) => Ok(expr.clone()),
            (None, Some(path)) => dsl::read_file(path),
            (None, None) => Ok(String::new()),
        }
    }
}

fn parse_quantity(s: &str) -> std::result::Result<f64, String> {
    dsl::parse_value(s).ok_or_else(|| format!("invalid quantity '{}'", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Show {
            source,
            current,
            frequency,
        } => show(&source.read()?, current, frequency, &mut out)?,
        Command::Bode {
            source,
            start,
            stop,
            points,
            markers,
            output,
        } => {
            let text = source.read()?;
            let filter = dsl::parse_filter(&text)?;
            let config = SweepConfig::new()
                .with_range(start, stop)
                .with_points(points);
            let diagram = BodeDiagram::sample(filter.to_string(), &filter, &config)?;

            match output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    output::write_bode_csv(&diagram, &mut writer)?;
                    writer.flush()?;
                    tracing::info!(path = %path.display(), points = diagram.points.len(), "wrote frequency response");
                }
                None => output::write_bode_csv(&diagram, &mut out)?,
            }
            if let Some(path) = markers {
                let mut writer = BufWriter::new(File::create(&path)?);
                output::write_markers_csv(&diagram, &mut writer)?;
                writer.flush()?;
                tracing::info!(path = %path.display(), markers = diagram.markers.len(), "wrote markers");
            }
        }
        Command::Freqs { source } => {
            let filter = dsl::parse_filter(&source.read()?)?;
            for f in filter.characteristic_frequencies() {
                writeln!(out, "{}", f)?;
            }
        }
        Command::Rc {
            cutoff,
            capacitance,
            kind,
        } => {
            let filter = RcFilter::for_cutoff_frequency(cutoff, capacitance, kind);
            writeln!(out, "{}", filter)?;
            writeln!(out, "R = {} Ω", filter.resistance())?;
        }
        Command::Divider { uin, ux, r1 } => {
            let divider = voltage_divider(uin, ux, r1)?;
            writeln!(out, "{}", divider)?;
            writeln!(out, "R = {} Ω", divider.resistance())?;
        }
    }

    Ok(())
}

fn show<W: Write>(
    text: &str,
    current: Option<f64>,
    frequency: Option<f64>,
    out: &mut W,
) -> Result<()> {
    match dsl::parse(text)? {
        Expr::Element(expr) => {
            let element = dsl::build_element(&expr)?;
            writeln!(out, "{}", element)?;
            writeln!(out, "R = {} Ω", element.resistance())?;
            if !element.is_leaf() {
                for child in element.children() {
                    writeln!(out, "  {}: R = {} Ω", child.name(), child.resistance())?;
                }
            }
            if let Some(i) = current {
                writeln!(out, "U = {} V", element.dc_voltage(i))?;
            }
            if let Some(f) = frequency {
                let z = element.impedance(f);
                writeln!(out, "Z({} Hz) = {} + {}j Ω", f, z.re, z.im)?;
                if let Some(divider) = element.as_divider() {
                    print_response(out, f, divider.transfer_function(f))?;
                }
            }
        }
        Expr::Filter(expr) => {
            let filter = dsl::build_filter(&expr)?;
            writeln!(out, "{}", filter)?;
            for f in filter.characteristic_frequencies() {
                writeln!(out, "f = {} Hz", f)?;
            }
            if let Some(f) = frequency {
                print_response(out, f, filter.transfer_function(f))?;
            }
        }
    }
    Ok(())
}

fn print_response<W: Write>(out: &mut W, frequency_hz: f64, h: Complex64) -> Result<()> {
    writeln!(
        out,
        "H({} Hz) = {} dB, {}°",
        frequency_hz,
        sweep::magnitude_db(h),
        sweep::phase_deg(h)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show_text(text: &str, current: Option<f64>, frequency: Option<f64>) -> String {
        let mut out = Vec::new();
        show(text, current, frequency, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_lists_children_of_composites() {
        let text = show_text("Ser(S1, Res(R1, 1k), Par(P1, Res(R2, 2k), Res(R3, 2k)))", Some(0.01), None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "R = 2000 Ω");
        assert_eq!(lines[2], "  R1: R = 1000 Ω");
        assert_eq!(lines[3], "  P1: R = 1000 Ω");
        assert_eq!(lines[4], "U = 20 V");
    }

    #[test]
    fn test_show_leaf_has_no_breakdown() {
        let text = show_text("Res(R1, 1k)", None, None);
        assert_eq!(text, "Res(R1, 1000 Ω)\nR = 1000 Ω\n");
    }
}
