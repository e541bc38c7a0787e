use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub importer: ImporterConfig,
    pub metric: MetricConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImporterConfig {
    /// Value of the `Project` tag that selects instances and volumes.
    pub tag: String,
    /// AWS region, e.g. "eu-central-1".
    pub location: String,
    /// Comma separated services to emit: "ec2", "ebs" or both.
    pub services: String,
    /// CloudWatch statistics period in seconds.
    pub observation_secs: u32,
    #[serde(default)]
    pub correlation: Correlation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricConfig {
    /// Namespace holding the agent memory metrics.
    pub cloudwatch_namespace: String,
    /// Namespace holding the EC2 CPU metrics.
    pub client_namespace: String,
}

/// How memory and CPU averages are paired into one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correlation {
    /// Pair by query position; the shorter list wins.
    #[default]
    Positional,
    /// Pair by the InstanceId dimension of each query.
    Instance,
}

impl ImporterConfig {
    pub fn services(&self) -> Vec<&str> {
        self.services
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn includes_service(&self, service: &str) -> bool {
        self.services().contains(&service)
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Copy of this config with `importer.services` replaced; the original is left untouched.
    pub fn with_services(&self, services: &str) -> Self {
        let mut config = self.clone();
        config.importer.services = services.to_string();
        config
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.importer.location.is_empty(),
            "importer.location must be non-empty"
        );
        anyhow::ensure!(
            self.importer.observation_secs > 0,
            "importer.observation_secs must be > 0, got {}",
            self.importer.observation_secs
        );
        anyhow::ensure!(
            self.importer.observation_secs % 60 == 0,
            "importer.observation_secs must be a multiple of 60, got {}",
            self.importer.observation_secs
        );
        anyhow::ensure!(
            i32::try_from(self.importer.observation_secs).is_ok(),
            "importer.observation_secs must be at most {}, got {}",
            i32::MAX,
            self.importer.observation_secs
        );
        anyhow::ensure!(
            !self.metric.cloudwatch_namespace.is_empty(),
            "metric.cloudwatch_namespace must be non-empty"
        );
        anyhow::ensure!(
            !self.metric.client_namespace.is_empty(),
            "metric.client_namespace must be non-empty"
        );
        Ok(())
    }
}
