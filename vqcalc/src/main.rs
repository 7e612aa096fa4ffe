use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use vqcalc::{ConversionReport, DelayReport, RatingReport, ReportOptions, SpeexReport, TableRow};

#[derive(Parser)]
#[command(name = "vqcalc")]
#[command(author = "Roman Imankulov")]
#[command(version)]
#[command(about = "Speech quality metric calculator", long_about = None)]
struct Cli {
    /// More log output (repeat for trace); VQ_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a speex quality or mode (exactly one) and show its bandwidth
    Speex {
        /// Encoder quality (0-10)
        #[arg(short, long)]
        quality: Option<u8>,
        /// Codec submode (1-8)
        #[arg(short, long)]
        mode: Option<u8>,
        /// Frames per packet, repeatable
        #[arg(long)]
        fpp: Vec<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every speex quality with its mode, frame size and bandwidth
    Table {
        /// Frames per packet, repeatable
        #[arg(long)]
        fpp: Vec<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert MOS LQO to R-factor
    MosToR {
        /// MOS LQO (1 < MOS < 4.5)
        mos: f64,
        #[arg(long)]
        json: bool,
    },
    /// Convert R-factor to MOS LQO
    RToMos {
        /// R-factor (0-100)
        r: f64,
        #[arg(long)]
        json: bool,
    },
    /// Delay impairment Id for a one-way delay
    Delay {
        /// One-way delay in ms
        delay_ms: f64,
        #[arg(long)]
        json: bool,
    },
    /// Rate a speex stream from loss, delay and measured Ie values
    Rating {
        /// Codec submode
        #[arg(short, long)]
        mode: u8,
        /// Packet loss in percent
        #[arg(short, long, default_value = "0")]
        loss: f64,
        /// One-way delay in ms
        #[arg(short, long, default_value = "0")]
        delay: f64,
        /// JSON file with measured Ie points per mode
        #[arg(long)]
        ie_table: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Speex {
            quality,
            mode,
            fpp,
            json,
        } => {
            let options = ReportOptions::default().with_frames_per_packet(fpp);
            let report = vqcalc::speex_report(quality, mode, &options)?;
            emit(&report, json, print_speex)?;
        }
        Commands::Table { fpp, json } => {
            let options = ReportOptions::default().with_frames_per_packet(fpp);
            let rows = vqcalc::speex_table(&options)?;
            emit(&rows, json, |rows: &Vec<TableRow>| print_table(rows))?;
        }
        Commands::MosToR { mos, json } => {
            emit(&ConversionReport::from_mos(mos), json, print_conversion)?;
        }
        Commands::RToMos { r, json } => {
            emit(&ConversionReport::from_r(r), json, print_conversion)?;
        }
        Commands::Delay { delay_ms, json } => {
            emit(&vqcalc::delay_report(delay_ms), json, print_delay)?;
        }
        Commands::Rating {
            mode,
            loss,
            delay,
            ie_table,
            json,
        } => {
            let table = vqcalc::load_ie_table(&ie_table)?;
            let report = vqcalc::rating_report(&table, mode, loss, delay)?;
            emit(&report, json, print_rating)?;
        }
    }

    Ok(())
}

/// stderr logging; VQ_LOG wins over -v
fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("VQ_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<T: Serialize>(value: &T, json: bool, readable: impl Fn(&T)) -> Result<()> {
    if json {
        let json_str = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
        println!("{}", json_str);
    } else {
        readable(value);
    }
    Ok(())
}

fn print_speex(report: &SpeexReport) {
    println!("Speex Setting");
    println!("───────────────────────────────");
    println!("  Quality:     {}", report.quality);
    println!("  Mode:        {}", report.mode);
    println!("  Frame size:  {} bits", report.frame_bits);
    println!("  Bitrate:     {} bps", report.bitrate);
    println!();
    println!("Bandwidth (RTP/UDP/IP)");
    println!("───────────────────────────────");
    for line in &report.bandwidth {
        println!(
            "  {:>2} fpp:      {} bps",
            line.frames_per_packet, line.bits_per_second
        );
    }
}

fn print_table(rows: &[TableRow]) {
    println!("Quality  Mode  Bits  Bandwidth (bps)");
    println!("═══════════════════════════════════════");
    for row in rows {
        match (&row.report, &row.error) {
            (Some(report), _) => {
                let bandwidth = report
                    .bandwidth
                    .iter()
                    .map(|b| format!("{}@{}", b.bits_per_second, b.frames_per_packet))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{:>7}  {:>4}  {:>4}  {}",
                    row.quality, row.mode, report.frame_bits, bandwidth
                );
            }
            (None, error) => {
                println!(
                    "{:>7}  {:>4}     -  ({})",
                    row.quality,
                    row.mode,
                    error.as_deref().unwrap_or("unavailable")
                );
            }
        }
    }
}

fn print_conversion(report: &ConversionReport) {
    println!("  MOS LQO:     {:.3}", report.mos);
    println!("  R-factor:    {:.2}", report.r_factor);
    println!("  Rating:      {}", report.band);
}

fn print_delay(report: &DelayReport) {
    println!("  Delay:       {} ms", report.delay_ms);
    println!("  Id:          {:.3}", report.id);
}

fn print_rating(report: &RatingReport) {
    println!("Speex Stream Rating");
    println!("───────────────────────────────");
    println!("  Mode:        {}", report.mode);
    println!("  Loss:        {}%", report.loss_percent);
    println!("  Delay:       {} ms", report.delay_ms);
    println!("  Id:          {:.3}", report.id);
    println!("  R-factor:    {:.2}", report.r_factor);
    println!("  MOS LQO:     {:.3}", report.mos);
    println!("  Rating:      {}", report.band);
}
