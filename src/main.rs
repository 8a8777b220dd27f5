//! Command-line image download tool.
//!
//! Usage:
//!   usbdl [-a <load_addr>] <filename>

use std::path::PathBuf;
use std::process;

use anyhow::{Context as _, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use usbdl::{BoardProfile, Context, Download, DownloadFrame, Operation};

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "usbdl")]
#[command(about = "Download a program image to an S3C24xx-style USB bootloader")]
#[command(after_help = format!(
    "Default load address: 0x{:08X} ({} RAM base)",
    usbdl::JZ2440.ram_base,
    usbdl::JZ2440.name
))]
struct Cli {
    /// Load address in hex (default: the board's RAM base)
    #[arg(short = 'a', value_name = "load_addr", value_parser = parse_hex_u32)]
    load_addr: Option<u32>,

    /// Image file to download
    #[arg(value_name = "filename")]
    filename: PathBuf,
}

/// Parses a hexadecimal address, with or without a leading `0x`.
fn parse_hex_u32(arg: &str) -> std::result::Result<u32, String> {
    let digits = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
        .unwrap_or(arg);
    u32::from_str_radix(digits, 16).map_err(|err| format!("invalid hex address: {}", err))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Usage problems, including -h, exit with status 1 rather than clap's
    // default of 2.
    let cli = Cli::try_parse().unwrap_or_else(|error| {
        let _ = error.print();
        process::exit(1);
    });

    if let Err(error) = run(cli) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let profile = BoardProfile::default();
    let load_addr = cli.load_addr.unwrap_or(profile.ram_base);

    let context = Context::new()?;
    let target = context.find_target(&profile)?;
    println!(
        "Target usb device found (bus {:03} device {:03})",
        target.usb_bus_number, target.usb_bus_address
    );
    let mut handle = target.open(&context, &profile)?;

    let frame = DownloadFrame::from_file(&cli.filename, load_addr)
        .with_context(|| format!("Cannot read {}", cli.filename.display()))?;

    println!("Load address: 0x{:08X}", load_addr);
    println!("{}: {} bytes", cli.filename.display(), frame.payload_len());

    let download = Download::over(&mut handle, &frame);
    let bar = ProgressBar::with_draw_target(
        Some(download.total() as u64),
        ProgressDrawTarget::stdout(),
    );
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{percent:>3}% [{bar:40}] {bytes}/{total_bytes}")?
            .progress_chars("#>-"),
    );

    for step in download {
        match step {
            Ok(written) => bar.set_position(written as u64),
            Err(error) => {
                bar.abandon();
                return Err(error).context("Transfer failed");
            }
        }
    }
    bar.finish();

    println!("Done!");
    Ok(())
}
