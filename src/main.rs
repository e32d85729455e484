use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pago::core::codec::{PAYLOAD_PARAM, decode_payload, percent_decode};
use pago::pages::encoder::encode_form;
use pago::prelude::*;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(
    name = "pago-qr",
    version,
    about = "Payment links and QR codes for bank transfers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web encoder and viewer.
    Serve(ServeArgs),
    /// Validate payment details and print their link and QR code.
    Encode(EncodeArgs),
    /// Print the record inside a link or raw payload.
    Decode(DecodeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen address, overrides `bind` from the configuration.
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Style {
    Neutral,
    Garage,
}

impl From<Style> for StyleVariant {
    fn from(style: Style) -> Self {
        match style {
            Style::Neutral => StyleVariant::Neutral,
            Style::Garage => StyleVariant::Garage,
        }
    }
}

#[derive(Args)]
struct EncodeArgs {
    /// Page header, e.g. the business name.
    #[arg(long, required_unless_present = "example")]
    header: Option<String>,
    /// 18-digit CLABE.
    #[arg(long, required_unless_present = "example")]
    clabe: Option<String>,
    /// Beneficiary name.
    #[arg(long, required_unless_present = "example")]
    name: Option<String>,
    #[arg(long, value_enum, default_value_t = Style::Neutral)]
    style: Style,
    /// Base URL the link points at.
    #[arg(long)]
    origin: Option<String>,
    /// YAML configuration file (origin and QR options).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use the sample merchant details.
    #[arg(long, conflicts_with_all = ["header", "clabe", "name"])]
    example: bool,
    /// Also write the QR code as a PNG to this path.
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Args)]
struct DecodeArgs {
    /// A full viewer link or just its payload.
    input: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the link, QR and decoded JSON
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Encode(args) => encode(args),
        Commands::Decode(args) => decode(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            let path = path.to_str().context("Config path is not valid UTF-8")?;
            AppConfig::from_yaml_file(path)
        }
        None => Ok(AppConfig::default()),
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let bind = config.bind.clone();
    tracing::info!(origin = %config.origin, "Starting pago-qr");

    ServerBuilder::new().with_config(config).serve(&bind).await
}

fn encode(args: EncodeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(origin) = args.origin {
        config = config.with_origin(origin);
    }
    config.validate()?;

    let form = if args.example {
        PaymentForm {
            style: args.style.into(),
            ..PaymentForm::example()
        }
    } else {
        PaymentForm {
            header: args.header.unwrap_or_default(),
            routing_code: args.clabe.unwrap_or_default(),
            beneficiary_name: args.name.unwrap_or_default(),
            style: args.style.into(),
        }
    };

    let form = match form.validated() {
        Ok(form) => form,
        Err(ValidationError::FieldErrors(errors)) => {
            for (field, messages) in &errors {
                for message in messages {
                    eprintln!("{}: {}", field, message);
                }
            }
            anyhow::bail!("Invalid payment details");
        }
        Err(e) => return Err(e.into()),
    };

    let (link, qr) = encode_form(&config, form)?;
    println!("{}", link.url);
    println!("{}", qr.terminal());

    if let Some(path) = args.png {
        std::fs::write(&path, qr.png()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote QR code");
    }

    Ok(())
}

/// Pull the payload out of a link, or take the input as the payload itself
fn payload_from_input(input: &str) -> Result<Option<String>, DecodeError> {
    match Url::parse(input) {
        Ok(url) => Ok(url
            .query_pairs()
            .find(|(key, _)| key == PAYLOAD_PARAM)
            .map(|(_, value)| value.into_owned())),
        Err(_) => percent_decode(input.trim()).map(Some),
    }
}

fn decode(args: DecodeArgs) -> Result<()> {
    let payload = payload_from_input(&args.input)?;
    let record = decode_payload(payload.as_deref())?;

    for (field, message) in record.anomalies() {
        tracing::warn!(field, message = %message, "Decoded record breaks form rules");
    }

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
