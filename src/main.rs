use std::env;
use std::fs::read_to_string;
use std::process::ExitCode;

use hwpanel::json::JsonValue;
use hwpanel::screens::status_message;
use hwpanel::ticker::scroll_text;
use hwpanel::{Client, Config, Panel, Screen, SensorReadings, SerialLink};
use tracing_subscriber::EnvFilter;

fn usage(program: &str) {
    eprintln!("Usage: {program} [SUBCOMMAND] [OPTIONS]");
    eprintln!("Subcommands:");
    eprintln!("    run [serial_port] [hwinfo_port]   drive the display (defaults from config)");
    eprintln!("    preview [json_file]               print the frames for a document (or a live fetch)");
    eprintln!("Environment:");
    eprintln!("    HWPANEL_CONFIG   path to a YAML config file");
    eprintln!("    RUST_LOG         log filter (default: info)");
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn client_for(config: &Config) -> Client {
    Client::with_timeout(config.hwinfo_url(), config.request_timeout())
}

async fn run(mut config: Config, mut args: env::Args) -> Result<(), ()> {
    if let Some(serial_port) = args.next() {
        config.serial_port = serial_port;
    }
    if let Some(port) = args.next() {
        config.hwinfo_port = port.parse().map_err(|err| {
            eprintln!("ERROR: invalid hwinfo port '{port}': {err}");
        })?;
        config.hwinfo_url = None;
    }

    let link = SerialLink::open(&config.serial_port, config.baud_rate, config.serial_timeout())
        .map_err(|err| {
            eprintln!("ERROR: {err}");
        })?;
    let client = client_for(&config);

    Panel::new(config, client, link).run().await.map_err(|err| {
        eprintln!("ERROR: {err}");
    })
}

async fn preview(config: Config, mut args: env::Args) -> Result<(), ()> {
    let raw = match args.next() {
        Some(path) => read_to_string(&path).map_err(|err| {
            eprintln!("ERROR: failed to read '{path}': {err}");
        })?,
        None => client_for(&config).fetch().await.map_err(|err| {
            eprintln!("ERROR: {err}");
        })?,
    };
    let document = JsonValue::parse(&raw).map_err(|err| {
        eprintln!("ERROR: {err}");
    })?;

    let readings = SensorReadings::resolve(&document, &config.sensors, config.index_policy);
    for (sensor, value) in readings.iter() {
        println!("{:<28}{value}", sensor.label());
    }
    println!();

    let message = status_message(&readings).unwrap_or(config.idle_message.as_str());
    for screen in [Screen::Performance, Screen::Clocks] {
        println!("{}", screen.render(&readings));
    }
    println!("{}", scroll_text(&chrono::Local::now(), message));
    Ok(())
}

async fn entry() -> Result<(), ()> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "hwpanel".to_string());

    let subcommand = args.next().ok_or_else(|| {
        usage(&program);
        eprintln!("ERROR: no subcommand is provided");
    })?;

    let config = Config::from_env().map_err(|err| {
        eprintln!("ERROR: {err}");
    })?;

    match subcommand.as_str() {
        "run" => run(config, args).await,
        "preview" => preview(config, args).await,
        _ => {
            usage(&program);
            eprintln!("ERROR: unknown subcommand {subcommand}");
            Err(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();
    match entry().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}
