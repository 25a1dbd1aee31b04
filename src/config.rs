use crate::consts::{
    DEFAULT_ARROWS_PER_END, DEFAULT_ENDS_PLANNED, DEFAULT_MAX_SCORE, DEFAULT_X_VALUE,
};
use crate::error::{QuiverError, QvResult};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

/// Scoring rules fixed once per session / score header.
///
/// Construct through [`ScoringConfiguration::new`], a [`RuleSet`] preset or
/// [`ScoringConfiguration::load_from_file`]; all three validate. Values built
/// by hand must go through [`ScoringConfiguration::validate`] before use, which
/// every engine entry point does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfiguration {
    pub arrows_per_end: u32,
    pub ends_planned: u32,
    pub max_score: u32,
    pub x_value: u32,
    /// Explicit allowed values, largest first (e.g. ASA `[14,12,10,8,5,0]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_values: Option<Vec<u32>>,
}

impl Default for ScoringConfiguration {
    fn default() -> Self {
        Self {
            arrows_per_end: DEFAULT_ARROWS_PER_END,
            ends_planned: DEFAULT_ENDS_PLANNED,
            max_score: DEFAULT_MAX_SCORE,
            x_value: DEFAULT_X_VALUE,
            scoring_values: None,
        }
    }
}

impl ScoringConfiguration {
    pub fn new(
        arrows_per_end: u32,
        ends_planned: u32,
        max_score: u32,
        x_value: u32,
    ) -> QvResult<Self> {
        let config = Self {
            arrows_per_end,
            ends_planned,
            max_score,
            x_value,
            scoring_values: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_scoring_values(mut self, values: Vec<u32>) -> QvResult<Self> {
        self.scoring_values = Some(values);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> QvResult<()> {
        if self.arrows_per_end == 0 {
            return Err(QuiverError::Config(
                "arrowsPerEnd must be positive".to_string(),
            ));
        }
        if self.ends_planned == 0 {
            return Err(QuiverError::Config(
                "endsPlanned must be positive".to_string(),
            ));
        }
        if self.max_score == 0 {
            return Err(QuiverError::Config("maxScore must be positive".to_string()));
        }
        if self.x_value < self.max_score {
            return Err(QuiverError::Config(format!(
                "xValue ({}) must be >= maxScore ({})",
                self.x_value, self.max_score
            )));
        }

        if let Some(values) = &self.scoring_values {
            if values.is_empty() {
                return Err(QuiverError::Config(
                    "scoringValues must not be empty when supplied".to_string(),
                ));
            }
            if values.windows(2).any(|w| w[0] <= w[1]) {
                return Err(QuiverError::Config(format!(
                    "scoringValues must be strictly descending, got {:?}",
                    values
                )));
            }
            if values[0] != self.max_score {
                return Err(QuiverError::Config(format!(
                    "scoringValues must start at maxScore ({}), got {:?}",
                    self.max_score, values
                )));
            }
        }

        // Every end, aggregate and statistics sum is bounded by this product.
        let ceiling = self
            .arrows_per_end
            .checked_mul(self.ends_planned)
            .and_then(|n| n.checked_mul(self.top_value()));
        if ceiling.is_none() {
            return Err(QuiverError::Config(format!(
                "{} arrows x {} ends at up to {} points overflows the score range",
                self.arrows_per_end,
                self.ends_planned,
                self.top_value()
            )));
        }
        Ok(())
    }

    /// Whether a plain numeric entry is allowed under these rules.
    #[inline]
    pub fn accepts(&self, points: u32) -> bool {
        match &self.scoring_values {
            Some(values) => values.contains(&points),
            None => points <= self.max_score,
        }
    }

    /// Highest value a single arrow can be worth.
    pub fn top_value(&self) -> u32 {
        let plain_top = match &self.scoring_values {
            Some(values) => values.first().copied().unwrap_or(self.max_score),
            None => self.max_score,
        };
        plain_top.max(self.x_value)
    }

    pub fn total_arrows(&self) -> usize {
        self.arrows_per_end as usize * self.ends_planned as usize
    }

    pub fn max_possible(&self) -> u32 {
        self.arrows_per_end * self.ends_planned * self.top_value()
    }

    /// Same face and end shape; only `ends_planned` may differ.
    pub fn is_compatible_with(&self, other: &ScoringConfiguration) -> bool {
        self.arrows_per_end == other.arrows_per_end
            && self.max_score == other.max_score
            && self.x_value == other.x_value
            && self.scoring_values == other.scoring_values
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> QvResult<Self> {
        let path = path.as_ref();
        debug!("Loading scoring configuration from {:?}", path);
        let content = fs::read_to_string(path)?;
        let config: ScoringConfiguration = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Named rule sets seen at leagues and events.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum RuleSet {
    /// 10-zone face, X worth 10.
    #[strum(serialize = "standard")]
    #[value(name = "standard")]
    #[serde(rename = "standard")]
    Standard,
    /// 10-zone face with the reduced X worth 11.
    #[strum(serialize = "lancaster")]
    #[value(name = "lancaster")]
    #[serde(rename = "lancaster")]
    Lancaster,
    /// NFAA indoor 300: 5-spot, 5 arrows x 12 ends.
    #[strum(serialize = "nfaa300")]
    #[value(name = "nfaa300")]
    #[serde(rename = "nfaa300")]
    Nfaa300,
    /// ASA 3D: one arrow per target, 14/12/10/8/5/0.
    #[strum(serialize = "asa3d")]
    #[value(name = "asa3d")]
    #[serde(rename = "asa3d")]
    Asa3d,
}

impl RuleSet {
    pub fn config(&self) -> ScoringConfiguration {
        match self {
            RuleSet::Standard => ScoringConfiguration::default(),
            RuleSet::Lancaster => ScoringConfiguration {
                x_value: 11,
                ..ScoringConfiguration::default()
            },
            RuleSet::Nfaa300 => ScoringConfiguration {
                arrows_per_end: 5,
                ends_planned: 12,
                max_score: 5,
                x_value: 5,
                scoring_values: None,
            },
            RuleSet::Asa3d => ScoringConfiguration {
                arrows_per_end: 1,
                ends_planned: 20,
                max_score: 14,
                x_value: 14,
                scoring_values: Some(vec![14, 12, 10, 8, 5, 0]),
            },
        }
    }
}

/// Command line view of a [`ScoringConfiguration`].
///
/// Resolution order: `--scoring-config` file or `--rule-set` preset (default
/// `standard`), then any explicit per-field flag on top.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    #[arg(long, value_enum)]
    pub rule_set: Option<RuleSet>,

    #[arg(long, conflicts_with = "rule_set")]
    pub scoring_config: Option<PathBuf>,

    #[arg(long)]
    pub arrows_per_end: Option<u32>,

    #[arg(long)]
    pub ends: Option<u32>,

    #[arg(long)]
    pub max_score: Option<u32>,

    #[arg(long)]
    pub x_value: Option<u32>,

    /// Comma separated, largest first, e.g. "14,12,10,8,5,0".
    #[arg(long)]
    pub scoring_values: Option<String>,
}

impl ScoringArgs {
    pub fn resolve(&self) -> QvResult<ScoringConfiguration> {
        let mut config = match (&self.scoring_config, self.rule_set) {
            (Some(path), _) => ScoringConfiguration::load_from_file(path)?,
            (None, Some(rule_set)) => rule_set.config(),
            (None, None) => RuleSet::Standard.config(),
        };

        if let Some(v) = self.arrows_per_end {
            config.arrows_per_end = v;
        }
        if let Some(v) = self.ends {
            config.ends_planned = v;
        }
        if let Some(v) = self.max_score {
            config.max_score = v;
        }
        if let Some(v) = self.x_value {
            config.x_value = v;
        }
        if let Some(raw) = &self.scoring_values {
            config.scoring_values = Some(parse_u32_list(raw, "scoring_values")?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_u32_list(s: &str, name: &str) -> QvResult<Vec<u32>> {
    let parts: Vec<&str> = s
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        return Err(QuiverError::Config(format!("--{} requires values", name)));
    }
    parts
        .iter()
        .map(|p| {
            p.parse::<u32>().map_err(|_| {
                QuiverError::Config(format!("Invalid number '{}' in --{}", p, name))
            })
        })
        .collect()
}
