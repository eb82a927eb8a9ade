use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MAIL_FROM: &str = "onboarding@resend.dev";
const DEFAULT_MAIL_TO: &str = "varnoraworks@gmail.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub from: String,
    pub to: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = get("VARNORA_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("VARNORA_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("VARNORA_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        let static_dir = get("VARNORA_STATIC_DIR")
            .unwrap_or_else(|| "./dist/public".into())
            .into();

        // No key means no relay; contact messages are only logged.
        let mail = get("RESEND_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .map(|api_key| MailConfig {
                api_key,
                from: get("VARNORA_MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.into()),
                to: get("VARNORA_MAIL_TO").unwrap_or_else(|| DEFAULT_MAIL_TO.into()),
            });

        Ok(Self {
            addr,
            static_dir,
            mail,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(cfg.static_dir, PathBuf::from("./dist/public"));
        assert!(cfg.mail.is_none());
    }

    #[test]
    fn mail_enabled_by_api_key() {
        let cfg = config(&[("RESEND_API_KEY", "re_123"), ("VARNORA_MAIL_TO", "hello@studio.dev")]).unwrap();
        let mail = cfg.mail.unwrap();
        assert_eq!(mail.api_key, "re_123");
        assert_eq!(mail.from, DEFAULT_MAIL_FROM);
        assert_eq!(mail.to, "hello@studio.dev");
    }

    #[test]
    fn blank_api_key_disables_mail() {
        let cfg = config(&[("RESEND_API_KEY", "  ")]).unwrap();
        assert!(cfg.mail.is_none());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("VARNORA_PORT", "http")]).is_err());
        assert!(config(&[("VARNORA_PORT", "70000")]).is_err());
    }

    #[test]
    fn host_and_port_override() {
        let cfg = config(&[("VARNORA_HOST", "127.0.0.1"), ("VARNORA_PORT", "8080")]).unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:8080".parse().unwrap());
    }
}
