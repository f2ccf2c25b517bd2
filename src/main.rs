use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cloudhaven::api::{format_api_error, ApiClient, RequestOptions, ServeMode};
use cloudhaven::config::Config;
use cloudhaven::notification::DetailLevel;
use cloudhaven::services::{auth, compute, dashboard};
use cloudhaven::types::auth::{LoginCredentials, ResetPasswordData};
use reqwest::Method;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line client for the CloudHaven console API
#[derive(Parser, Debug)]
#[command(name = "cloudhaven", version, about, long_about = None)]
struct Args {
    /// Where calls are answered from
    #[arg(short, long, value_enum)]
    mode: Option<ServeMode>,

    /// API base URL
    #[arg(short, long)]
    base_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Raw call through the fetch wrapper
    Request {
        /// HTTP method (GET, POST, PUT, DELETE)
        method: String,
        /// Endpoint path, e.g. /compute/instances
        endpoint: String,
        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
    },
    /// List every mock route, most specific first
    Routes,
    /// Show the dashboard summary
    Dashboard,
    /// Manage compute instances
    Instances {
        #[command(subcommand)]
        action: Option<InstanceAction>,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Request a password reset link
    ResetPassword {
        #[arg(long)]
        email: String,
    },
    /// Show or change saved configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
enum InstanceAction {
    List,
    Get { id: String },
    Start { id: String },
    Stop { id: String },
    Restart { id: String },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    SetMode {
        #[arg(value_enum)]
        mode: ServeMode,
    },
    SetUrl { url: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cloudhaven started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cloudhaven").join("cloudhaven.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cloudhaven").join("cloudhaven.log");
    }
    PathBuf::from("cloudhaven.log")
}

fn print_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();

    if let Command::Config { action } = &args.command {
        run_config(&mut config, action.as_ref(), args.output)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mode = config.effective_mode(args.mode);
    let base_url = config.effective_base_url(args.base_url.as_deref());
    tracing::info!("Serving from {} ({})", base_url, mode);

    let client = ApiClient::new(&base_url, mode)?;
    let result = run(&client, &args).await;

    print_toasts(&client, &config).await;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!("Command failed: {:#}", err);
            eprintln!("Error: {}", failure_message(&err));
            // Log guard must drop before the process exits
            Ok(ExitCode::FAILURE)
        },
    }
}

/// User-facing text for a failed command
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<cloudhaven::ApiError>() {
        Some(api_err) => format_api_error(api_err),
        None => format!("{err:#}"),
    }
}

async fn run(client: &ApiClient, args: &Args) -> Result<()> {
    match &args.command {
        Command::Request {
            method,
            endpoint,
            data,
        } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP method: {}", method))?;
            let mut options = RequestOptions::new(method);
            if let Some(data) = data {
                let body: serde_json::Value =
                    serde_json::from_str(data).context("--data must be valid JSON")?;
                options = options.json(&body)?;
            }
            let value = client.fetch_value(endpoint, options).await?;
            print_output(&value, args.output)
        },
        Command::Routes => {
            for route in client.router().routes() {
                println!(
                    "{:<10} {:<7} {}",
                    route.domain.as_str(),
                    route.method.as_str(),
                    route.template
                );
            }
            Ok(())
        },
        Command::Dashboard => {
            let summary = dashboard::get_summary(client).await?;
            print_output(&summary, args.output)
        },
        Command::Instances { action } => {
            run_instances(client, action.as_ref(), args.output).await
        },
        Command::Login { email, password } => {
            let credentials = LoginCredentials {
                email: email.clone(),
                password: password.clone(),
            };
            let session = auth::login(client, &credentials).await?;
            print_output(&session, args.output)
        },
        Command::ResetPassword { email } => {
            let notice = auth::reset_password(
                client,
                &ResetPasswordData {
                    email: email.clone(),
                },
            )
            .await;
            println!("{}: {}", notice.title, notice.description);
            Ok(())
        },
        Command::Config { .. } => Ok(()),
    }
}

async fn run_instances(
    client: &ApiClient,
    action: Option<&InstanceAction>,
    output: OutputFormat,
) -> Result<()> {
    match action.unwrap_or(&InstanceAction::List) {
        InstanceAction::List => {
            let instances = compute::list_instances(client).await?;
            print_output(&instances, output)
        },
        InstanceAction::Get { id } => {
            let instance = compute::get_instance(client, id).await?;
            print_output(&instance, output)
        },
        InstanceAction::Start { id } => {
            let response = compute::start_instance(client, id).await?;
            print_output(&response, output)
        },
        InstanceAction::Stop { id } => {
            let response = compute::stop_instance(client, id).await?;
            print_output(&response, output)
        },
        InstanceAction::Restart { id } => {
            let response = compute::restart_instance(client, id).await?;
            print_output(&response, output)
        },
    }
}

fn run_config(
    config: &mut Config,
    action: Option<&ConfigAction>,
    output: OutputFormat,
) -> Result<()> {
    match action.unwrap_or(&ConfigAction::Show) {
        ConfigAction::Show => print_output(&*config, output),
        ConfigAction::SetMode { mode } => {
            config.set_mode(*mode)?;
            println!("Serve mode set to {}", mode);
            Ok(())
        },
        ConfigAction::SetUrl { url } => {
            config
                .set_base_url(url)
                .with_context(|| format!("Invalid API base URL: {}", url))?;
            println!("API base URL set to {}", url);
            Ok(())
        },
    }
}

/// Print failure toasts raised during the call to stderr
async fn print_toasts(client: &ApiClient, config: &Config) {
    let notifications = client.notifications();
    let mut manager = notifications.write().await;
    if let Some(level) = &config.detail_level {
        manager.detail_level = DetailLevel::from_str(level);
    }
    for line in manager.toast_lines() {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudhaven::ApiError;

    #[test]
    fn test_failure_message_uses_api_wording() {
        let err = anyhow::Error::new(ApiError::InvalidCredentials);
        assert_eq!(failure_message(&err), ApiError::InvalidCredentials.to_string());

        let err = anyhow::anyhow!("no such command");
        assert_eq!(failure_message(&err), "no such command");
    }

    #[test]
    fn test_mock_command_failure_is_reported() {
        let client = ApiClient::mock().unwrap();
        let args = Args::parse_from([
            "cloudhaven",
            "--mode",
            "mock",
            "instances",
            "get",
            "vm-99",
        ]);

        let err = tokio_test::block_on(run(&client, &args)).unwrap_err();
        assert_eq!(failure_message(&err), "Instance not found: vm-99");
    }
}
