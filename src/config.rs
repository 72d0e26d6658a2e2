use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{AgentWeights, HybridWeights, RatingScale};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    #[serde(default)]
    pub recommend: RecommendSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub hybrid: HybridWeightsConfig,
    #[serde(default)]
    pub agents: AgentWeightsConfig,
    #[serde(default)]
    pub rating_scale: RatingScaleConfig,
    #[serde(default = "default_neutral_feedback")]
    pub neutral_feedback: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            hybrid: HybridWeightsConfig::default(),
            agents: AgentWeightsConfig::default(),
            rating_scale: RatingScaleConfig::default(),
            neutral_feedback: default_neutral_feedback(),
        }
    }
}

fn default_neutral_feedback() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct HybridWeightsConfig {
    #[serde(default = "default_agent_weight")]
    pub agent: f64,
    #[serde(default = "default_rag_weight")]
    pub rag: f64,
    #[serde(default = "default_feedback_weight")]
    pub feedback: f64,
}

impl Default for HybridWeightsConfig {
    fn default() -> Self {
        Self {
            agent: default_agent_weight(),
            rag: default_rag_weight(),
            feedback: default_feedback_weight(),
        }
    }
}

fn default_agent_weight() -> f64 {
    0.45
}
fn default_rag_weight() -> f64 {
    0.45
}
fn default_feedback_weight() -> f64 {
    0.10
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentWeightsConfig {
    #[serde(default = "default_dimension_weight")]
    pub capacity: f64,
    #[serde(default = "default_dimension_weight")]
    pub amenity: f64,
    #[serde(default = "default_dimension_weight")]
    pub location: f64,
    #[serde(default = "default_dimension_weight")]
    pub cost: f64,
    #[serde(default = "default_dimension_weight")]
    pub special: f64,
}

impl Default for AgentWeightsConfig {
    fn default() -> Self {
        Self {
            capacity: default_dimension_weight(),
            amenity: default_dimension_weight(),
            location: default_dimension_weight(),
            cost: default_dimension_weight(),
            special: default_dimension_weight(),
        }
    }
}

fn default_dimension_weight() -> f64 {
    0.20
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingScaleConfig {
    #[serde(default = "default_scale_min")]
    pub min: f64,
    #[serde(default = "default_scale_max")]
    pub max: f64,
}

impl Default for RatingScaleConfig {
    fn default() -> Self {
        Self {
            min: default_scale_min(),
            max: default_scale_max(),
        }
    }
}

fn default_scale_min() -> f64 {
    1.0
}
fn default_scale_max() -> f64 {
    5.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    #[serde(default = "default_retrieval_k")]
    pub k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            k: default_retrieval_k(),
        }
    }
}

fn default_retrieval_k() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendSettings {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    3
}
fn default_max_top_n() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with VENUE_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. VENUE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("VENUE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VENUE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate every scoring and retrieval configurable
    ///
    /// Runs before the server binds so a bad weight mapping never reaches a
    /// scoring pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hybrid_sum =
            self.scoring.hybrid.agent + self.scoring.hybrid.rag + self.scoring.hybrid.feedback;
        if (hybrid_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::Message(format!(
                "scoring.hybrid weights must sum to 1.0, got {}",
                hybrid_sum
            )));
        }

        let agents = &self.scoring.agents;
        let agent_sum =
            agents.capacity + agents.amenity + agents.location + agents.cost + agents.special;
        if (agent_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::Message(format!(
                "scoring.agents weights must sum to 1.0, got {}",
                agent_sum
            )));
        }

        if self.scoring.rating_scale.max <= self.scoring.rating_scale.min {
            return Err(ConfigError::Message(format!(
                "scoring.rating_scale max ({}) must exceed min ({})",
                self.scoring.rating_scale.max, self.scoring.rating_scale.min
            )));
        }

        if !(0.0..=1.0).contains(&self.scoring.neutral_feedback) {
            return Err(ConfigError::Message(format!(
                "scoring.neutral_feedback must be in [0, 1], got {}",
                self.scoring.neutral_feedback
            )));
        }

        if self.retrieval.k == 0 {
            return Err(ConfigError::Message(
                "retrieval.k must be at least 1".to_string(),
            ));
        }

        if self.recommend.default_top_n == 0 {
            return Err(ConfigError::Message(
                "recommend.default_top_n must be at least 1".to_string(),
            ));
        }
        if self.recommend.default_top_n > self.recommend.max_top_n {
            return Err(ConfigError::Message(format!(
                "recommend.default_top_n ({}) must not exceed recommend.max_top_n ({})",
                self.recommend.default_top_n, self.recommend.max_top_n
            )));
        }

        Ok(())
    }

    pub fn hybrid_weights(&self) -> HybridWeights {
        HybridWeights {
            agent: self.scoring.hybrid.agent,
            rag: self.scoring.hybrid.rag,
            feedback: self.scoring.hybrid.feedback,
        }
    }

    pub fn agent_weights(&self) -> AgentWeights {
        AgentWeights {
            capacity: self.scoring.agents.capacity,
            amenity: self.scoring.agents.amenity,
            location: self.scoring.agents.location,
            cost: self.scoring.agents.cost,
            special: self.scoring.agents.special,
        }
    }

    pub fn rating_scale(&self) -> RatingScale {
        RatingScale {
            min: self.scoring.rating_scale.min,
            max: self.scoring.rating_scale.max,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            data: DataSettings::default(),
            scoring: ScoringSettings::default(),
            retrieval: RetrievalSettings::default(),
            recommend: RecommendSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}
