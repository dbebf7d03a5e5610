//! Web monitor binary
//!
//! Run with: botwatch [BIND_ADDR]
//!
//! Examples:
//!   botwatch                    # binds to 0.0.0.0:8084
//!   botwatch localhost          # binds to 127.0.0.1:8084
//!   botwatch 127.0.0.1:9000     # binds to 127.0.0.1:9000
//!
//! ## Pushing data
//!
//! A bot announces itself and keeps its status fresh:
//!   curl -X PUT http://localhost:8084/login_bot/miner-01/10.0.0.5/41/frostford
//!
//! Frames go in as base64 text, raw bytes or a file upload:
//!   curl -X POST http://localhost:8084/send_frame_from_string/miner-01 \
//!        -H 'Content-Type: application/json' -d '{"img_base64str": "..."}'
//!
//! ## Watching
//!
//! One bot's MJPEG feed:   http://localhost:8084/video_feed/miner-01
//! Whole-fleet snapshots:  http://localhost:8084/base64_stream

use std::net::SocketAddr;

use botwatch::{MonitorServer, ServerConfig};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:8084
/// - "localhost:9000" -> 127.0.0.1:9000
/// - "10.0.0.2" -> 10.0.0.2:8084
/// - "10.0.0.2:9000" -> 10.0.0.2:9000
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 8084;

    // Replace "localhost" with "127.0.0.1"
    let normalized = arg.replace("localhost", "127.0.0.1");

    // Try parsing as SocketAddr first (includes port)
    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    // Try parsing as IP address without port
    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: botwatch [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:8084)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:8084".parse().unwrap(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("botwatch=debug".parse()?),
        )
        .init();

    let config = ServerConfig::default().bind(bind_addr);
    let server = MonitorServer::new(config);

    println!("Starting web monitor on {}", server.bind_addr());

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
            println!("\nShutting down...");
        })
        .await?;

    Ok(())
}
