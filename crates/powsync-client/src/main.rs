//! `powsync` command line
//!
//! Drives a refresh, a dashboard fetch or a state advance against a live
//! backend and prints the resulting error log.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use powsync_client::{ClientConfig, HttpBackend, SyncClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("powsync_client=info,powsync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let station_arg = || {
        Arg::new("station")
            .long("station")
            .required(true)
            .help("Station name")
    };

    let cli = Command::new("powsync")
        .version(powsync_client::VERSION)
        .about("Powonline client store command line")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .help("Base URL of the REST API"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .help("Bearer token"),
        )
        .subcommand(Command::new("refresh").about("Load all collections and assignments"))
        .subcommand(
            Command::new("dashboard")
                .about("Show the dashboard of a station")
                .arg(station_arg()),
        )
        .subcommand(
            Command::new("advance")
                .about("Advance a team's state on a station")
                .arg(station_arg())
                .arg(
                    Arg::new("team")
                        .long("team")
                        .required(true)
                        .help("Team name"),
                ),
        );

    let matches = cli.get_matches();
    let config = load_config(&matches)?;
    let client = SyncClient::new(HttpBackend::new(&config).context("invalid configuration")?);
    tracing::info!("Using backend at {}", client.backend().base_url());

    match matches.subcommand() {
        Some(("refresh", _)) => {
            client.refresh_all().await;
            print_overview(&client);
        }
        Some(("dashboard", args)) => {
            let station = required(args, "station")?;
            client.fetch_dashboard(station).await;
            print_dashboard(&client);
        }
        Some(("advance", args)) => {
            let station = required(args, "station")?;
            let team = required(args, "team")?;
            client.advance_state(station, team).await;
            print_dashboard(&client);
        }
        _ => unreachable!("subcommand is required"),
    }

    let state = client.take_state();
    if state.errors.is_empty() {
        return Ok(());
    }

    eprintln!("Error log:");
    for entry in state.errors.entries() {
        eprintln!("  [{}] {} ({}): {}", entry.occurred_at, entry.action, entry.kind, entry.message);
        for (field, message) in &entry.fields {
            eprintln!("      {field}: {message}");
        }
    }
    std::process::exit(1);
}

/// File, then environment, then command line flags
fn load_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ClientConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => ClientConfig::new(),
    };
    config = config.apply_env()?;

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url);
    }
    if let Some(token) = matches.get_one::<String>("token") {
        config = config.with_token(token);
    }
    Ok(config)
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

fn print_overview(client: &SyncClient<HttpBackend>) {
    client.read(|state| {
        println!("Users:    {}", state.store.users.len());
        println!("Teams:    {}", state.store.teams.len());
        println!("Stations: {}", state.store.stations.len());
        println!("Routes:   {}", state.store.routes.len());
        println!();

        for route in state.route_names() {
            println!("Route {route}");
            println!("  teams:    {}", state.assigned_teams(&route).join(", "));
            println!("  stations: {}", state.assigned_stations(&route).join(", "));
        }
        println!("Unassigned teams: {}", state.unassigned_teams().join(", "));
    });
}

fn print_dashboard(client: &SyncClient<HttpBackend>) {
    let Some(dashboard) = client.dashboard() else {
        return;
    };

    println!("Dashboard for {}", dashboard.station);
    for row in &dashboard.rows {
        println!("  {row}");
    }
}
