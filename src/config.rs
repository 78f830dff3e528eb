use clap::builder::TypedValueParser as _;
use clap::Parser;
use hub_webhook::validator::SIGNATURE_HEADER;
use hub_webhook::Validator;
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env, default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Route the webhook is served on.
    #[arg(long, env = "HOOK_PATH", default_value = "/", value_parser = parse_route)]
    pub path: String,

    /// Secret configured for the webhook. Without it, signatures are not
    /// checked and any well-formed delivery is accepted.
    #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// Header carrying the `algorithm=hexdigest` signature.
    #[arg(long, env, default_value = SIGNATURE_HEADER)]
    pub signature_header: String,

    /// Log level filter.
    #[arg(
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Config {
    pub fn validator(&self) -> Validator {
        Validator::new(self.secret.clone()).with_signature_header(self.signature_header.clone())
    }
}

fn parse_route(path: &str) -> Result<String, String> {
    if path.starts_with('/') {
        Ok(path.to_string())
    } else {
        Err(format!("route must start with '/': {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["hub-webhook"]).unwrap();
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert_eq!(config.path, "/");
        assert_eq!(config.signature_header, "X-Hub-Signature");
        assert_eq!(config.log_level_filter, LevelFilter::Info);
    }

    #[test]
    fn test_secret_and_signature_header_reach_validator() {
        let config = Config::try_parse_from([
            "hub-webhook",
            "--secret",
            "12345",
            "--signature-header",
            "X-Hub-Signature-256",
            "--path",
            "/hooks/github",
        ])
        .unwrap();
        let validator = config.validator();
        assert!(validator.has_secret());
        assert_eq!(validator.signature_header(), "X-Hub-Signature-256");
        assert_eq!(config.path, "/hooks/github");
    }

    #[test]
    fn test_rejects_relative_route() {
        assert!(Config::try_parse_from(["hub-webhook", "--path", "hooks"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Config::try_parse_from(["hub-webhook", "--log-level-filter", "LOUD"]).is_err());
    }
}
