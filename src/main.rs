use anyhow::Result;
use clap::Parser;
use freeimage_uploader::config::{self, ENDPOINT_VAR, TIMEOUT_VAR};
use freeimage_uploader::{FreeimageClient, ImageUploader, UploadOutcome, UploaderConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "freeimage-uploader")]
#[command(about = "Upload images to freeimage.host and print their public URLs")]
struct CliArgs {
    /// Image files to upload.
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// Override the upload endpoint (defaults to FREEIMAGE_ENDPOINT or freeimage.host).
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_arg)]
    timeout: Option<Duration>,
}

fn parse_timeout_arg(input: &str) -> std::result::Result<Duration, String> {
    match input.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(format!(
            "Invalid timeout '{}'. Expected a positive number of seconds",
            input
        )),
    }
}

/// Flags shadow their environment variables, so an unusable env value is
/// never validated when a flag replaces it.
fn load_config<F>(args: &CliArgs, env: F) -> freeimage_uploader::Result<UploaderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    UploaderConfig::from_lookup(|name| match name {
        ENDPOINT_VAR => args.endpoint.clone().or_else(|| env(name)),
        TIMEOUT_VAR => args
            .timeout
            .map(|timeout| timeout.as_secs().to_string())
            .or_else(|| env(name)),
        _ => env(name),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "freeimage_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match config::load_dotenv()
        .and_then(|_| load_config(&args, |name| std::env::var(name).ok()))
    {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Using upload endpoint {}", config.endpoint);

    let uploader = FreeimageClient::new(config);
    let mut failures = 0;

    for path in &args.images {
        match uploader.upload_path(path).await {
            Ok(UploadOutcome::Success { url }) => println!("{}: {}", path.display(), url),
            Ok(UploadOutcome::Failure { message, .. }) => {
                error!("{}: upload failed: {}", path.display(), message);
                failures += 1;
            }
            Err(e) => {
                error!("{}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        error!("{} of {} uploads failed", failures, args.images.len());
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use freeimage_uploader::config::API_KEY_VAR;
    use std::collections::HashMap;

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_timeout_arg_valid() {
        assert_eq!(parse_timeout_arg("15").unwrap(), Duration::from_secs(15));
    }

    #[test]
    fn test_parse_timeout_arg_invalid() {
        assert!(parse_timeout_arg("0").is_err());
        let err = parse_timeout_arg("soon").unwrap_err();
        assert!(err.contains("positive number"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = CliArgs::try_parse_from([
            "freeimage-uploader",
            "--endpoint",
            "http://localhost:8080/upload",
            "--timeout",
            "5",
            "a.png",
            "b.jpg",
        ])
        .unwrap();

        let config = load_config(
            &args,
            env_from(&[
                (API_KEY_VAR, "key"),
                (ENDPOINT_VAR, "https://default"),
                (TIMEOUT_VAR, "30"),
            ]),
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/upload");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(args.images.len(), 2);
    }

    #[test]
    fn test_timeout_flag_shadows_invalid_env_value() {
        let args =
            CliArgs::try_parse_from(["freeimage-uploader", "--timeout", "7", "a.png"]).unwrap();

        let config = load_config(
            &args,
            env_from(&[(API_KEY_VAR, "key"), (TIMEOUT_VAR, "not-a-number")]),
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_invalid_env_timeout_without_flag_fails() {
        let args = CliArgs::try_parse_from(["freeimage-uploader", "a.png"]).unwrap();

        let err = load_config(
            &args,
            env_from(&[(API_KEY_VAR, "key"), (TIMEOUT_VAR, "not-a-number")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_env_used_when_no_flags() {
        let args = CliArgs::try_parse_from(["freeimage-uploader", "a.png"]).unwrap();

        let config = load_config(
            &args,
            env_from(&[(API_KEY_VAR, "key"), (ENDPOINT_VAR, "http://env/upload")]),
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://env/upload");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_cli_requires_an_image() {
        assert!(CliArgs::try_parse_from(["freeimage-uploader"]).is_err());
    }
}
