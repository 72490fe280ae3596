use crate::probes::ProbeKind;
use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fortigate: FortigateConfig,
    #[serde(default)]
    pub probes: ProbeConfig,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings shared by every appliance the exporter talks to.
#[derive(Debug, Deserialize, Clone)]
pub struct FortigateConfig {
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Probe selection. An empty `include` list selects every probe; `exclude`
/// always wins over `include`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProbeConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TargetConfig {
    pub url: String,
    pub token: SecretString,
    /// Overrides the global `[probes]` section for this target.
    #[serde(default)]
    pub probes: Option<ProbeConfig>,
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9710
}

fn default_verify_ssl() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for FortigateConfig {
    fn default() -> Self {
        Self {
            verify_ssl: default_verify_ssl(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ProbeConfig {
    /// Resolves the configured names into the ordered list of probes to run.
    pub fn select(&self) -> Vec<ProbeKind> {
        ProbeKind::ALL
            .into_iter()
            .filter(|kind| {
                let name = kind.name();
                (self.include.is_empty() || self.include.iter().any(|n| n == name))
                    && !self.exclude.iter().any(|n| n == name)
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        for name in self.include.iter().chain(self.exclude.iter()) {
            if name.parse::<ProbeKind>().is_err() {
                bail!("Unknown probe name in configuration: {}", name);
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("FORTIGATE_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fortigate.timeout_seconds == 0 {
            bail!("fortigate.timeout_seconds must be greater than zero");
        }
        self.probes.validate()?;
        for target in &self.targets {
            if target.url.trim().is_empty() {
                bail!("Target URL must not be empty");
            }
            if let Some(probes) = &target.probes {
                probes
                    .validate()
                    .with_context(|| format!("Invalid probe selection for {}", target.url))?;
            }
        }
        Ok(())
    }

    /// Looks up a configured target, ignoring a trailing slash on either side.
    pub fn target(&self, url: &str) -> Option<&TargetConfig> {
        let wanted = url.trim_end_matches('/');
        self.targets
            .iter()
            .find(|t| t.url.trim_end_matches('/') == wanted)
    }

    /// Probes enabled for a target, honouring its per-target override.
    pub fn probes_for(&self, target: &TargetConfig) -> Vec<ProbeKind> {
        target.probes.as_ref().unwrap_or(&self.probes).select()
    }
}
