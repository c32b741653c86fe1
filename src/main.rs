use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use uhf_scan::{
    CycleOutcome, ERR_NO_TAG, ScanConfig, ScanSession, SerialTransport, bytes_to_hex,
};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Serial device the reader module is attached to
    #[clap(long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// Line speed in bits per second
    #[clap(long, default_value_t = 115_200)]
    baud: u32,

    /// Read timeout per cycle, in milliseconds
    #[clap(long, default_value_t = 1000)]
    read_timeout_ms: u64,

    /// Delay between polling cycles, in milliseconds
    #[clap(long, default_value_t = 500)]
    poll_interval_ms: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    log::debug!("Args: {:?}", args);

    let config = ScanConfig {
        port: args.port,
        baud_rate: args.baud,
        read_timeout: Duration::from_millis(args.read_timeout_ms),
        poll_interval: Duration::from_millis(args.poll_interval_ms),
    };

    let transport = SerialTransport::open(&config)
        .with_context(|| format!("failed to open serial port {}", config.port))?;

    println!("Connected to {}", config.port);
    println!("Scanning for RFID tags. Make sure tag is close to antenna.");
    println!("Press Ctrl+C to exit\n");

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("failed to install interrupt handler")?;
    }

    let poll_interval = config.poll_interval;
    let mut session = ScanSession::new(transport, config);

    while running.load(Ordering::SeqCst) {
        let outcome = session.run_cycle().context("scan cycle failed")?;
        report(&outcome);
        thread::sleep(poll_interval);
    }

    println!("\nExiting...");
    Ok(())
}

/// Render one cycle outcome on the console.
fn report(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::NoResponse => println!("No response from reader"),
        CycleOutcome::Tag(tag) => {
            println!("Tag detected! EPC: {}", tag.epc_hex());
            println!("RSSI: {}, PC: 0x{:04X}", tag.rssi, tag.pc);
        }
        CycleOutcome::ReaderError { code: ERR_NO_TAG } => {
            println!("No tag detected (inventory fail)")
        }
        CycleOutcome::ReaderError { code } => println!("Error: 0x{:02X}", code),
        CycleOutcome::Unclassified(raw) => {
            println!("Unrecognized response: {}", bytes_to_hex(raw))
        }
        CycleOutcome::Malformed { failure, raw } => {
            println!("Parse error: {}", failure);
            println!("Raw response: {}", bytes_to_hex(raw));
        }
    }
}
