use std::f64::consts::PI;

/// Parameter record consumed by [`crate::engine::GrowthEngine`].
///
/// The record is plain data; nothing in the crate mutates it once an
/// engine has been built from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: f64,
    pub height: f64,
    pub soil_depth: f64,
    pub cycles: usize,

    pub base_branch_len: f64,
    pub branch_angle_range: f64,
    pub branch_prob: f64,
    pub leaf_base_size: f64,

    pub base_root_len: f64,
    pub root_angle_range: f64,

    pub flower_cycle_start: usize,
    pub flower_base_size: f64,
    pub flower_colors: Vec<String>,
}

/// Errors produced while building or checking a [`Config`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown parameter `{0}`")]
    UnknownKey(String),
    #[error("parameter `{key}` expects a number, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
    #[error("parameter `{key}` must be greater than zero, got {value}")]
    NonPositiveExtent { key: &'static str, value: f64 },
    #[error("parameter `{key}` must be finite")]
    NonFinite { key: &'static str },
    #[error("parameter `{key}` must not be negative, got {value}")]
    NegativeAngleRange { key: &'static str, value: f64 },
    #[error("FLOWER_COLORS must name at least one color")]
    EmptyPalette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            soil_depth: 20.0,
            cycles: 60,
            base_branch_len: 1.0,
            branch_angle_range: PI / 6.0,
            branch_prob: 0.35,
            leaf_base_size: 1.5,
            base_root_len: 0.5,
            root_angle_range: PI / 8.0,
            flower_cycle_start: 40,
            flower_base_size: 5.0,
            flower_colors: vec!["red".into(), "pink".into(), "orange".into()],
        }
    }
}

impl Config {
    /// Parameter names accepted by [`Config::set`], in display order.
    pub const KEYS: [&'static str; 13] = [
        "WIDTH",
        "HEIGHT",
        "SOIL_DEPTH",
        "CYCLES",
        "BASE_BRANCH_LEN",
        "BRANCH_ANGLE_RANGE",
        "BRANCH_PROB",
        "LEAF_BASE_SIZE",
        "BASE_ROOT_LEN",
        "ROOT_ANGLE_RANGE",
        "FLOWER_CYCLE_START",
        "FLOWER_BASE_SIZE",
        "FLOWER_COLORS",
    ];

    /// Overrides a single parameter from its textual form.
    ///
    /// `key` is matched case-insensitively against [`Config::KEYS`].
    /// Integer parameters (`CYCLES`, `FLOWER_CYCLE_START`) must parse as
    /// unsigned integers, `FLOWER_COLORS` is a comma-separated list (blank
    /// items are dropped) and everything else parses as `f64`.
    ///
    /// ### Parameters
    /// - `key` - Parameter name, e.g. `"BRANCH_PROB"`.
    /// - `text` - Raw value as typed by the user.
    ///
    /// ### Returns
    /// - `Ok(())` if the value was stored.
    /// - `Err(ConfigError::UnknownKey)` for an unrecognized name.
    /// - `Err(ConfigError::InvalidNumber)` if the text is not a valid number.
    ///   The previous value is kept in that case.
    pub fn set(&mut self, key: &str, text: &str) -> Result<(), ConfigError> {
        let canonical = Self::KEYS
            .iter()
            .copied()
            .find(|k| k.eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let text = text.trim();

        match canonical {
            "CYCLES" => self.cycles = parse_int(canonical, text)?,
            "FLOWER_CYCLE_START" => self.flower_cycle_start = parse_int(canonical, text)?,
            "FLOWER_COLORS" => {
                self.flower_colors = text
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            real => *self.real_mut(real) = parse_real(real, text)?,
        }
        Ok(())
    }

    /// Checks that the record describes a usable simulation domain.
    ///
    /// Rejects zero, negative or non-finite domain extents (which would
    /// turn every field sample into NaN/Inf), non-finite tuning values,
    /// negative angle ranges and an empty flower palette.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("WIDTH", self.width),
            ("HEIGHT", self.height),
            ("SOIL_DEPTH", self.soil_depth),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { key });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveExtent { key, value });
            }
        }

        for (key, value) in [
            ("BASE_BRANCH_LEN", self.base_branch_len),
            ("BRANCH_PROB", self.branch_prob),
            ("LEAF_BASE_SIZE", self.leaf_base_size),
            ("BASE_ROOT_LEN", self.base_root_len),
            ("FLOWER_BASE_SIZE", self.flower_base_size),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { key });
            }
        }

        for (key, value) in [
            ("BRANCH_ANGLE_RANGE", self.branch_angle_range),
            ("ROOT_ANGLE_RANGE", self.root_angle_range),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { key });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeAngleRange { key, value });
            }
        }

        if self.flower_colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    fn real_mut(&mut self, key: &str) -> &mut f64 {
        match key {
            "WIDTH" => &mut self.width,
            "HEIGHT" => &mut self.height,
            "SOIL_DEPTH" => &mut self.soil_depth,
            "BASE_BRANCH_LEN" => &mut self.base_branch_len,
            "BRANCH_ANGLE_RANGE" => &mut self.branch_angle_range,
            "BRANCH_PROB" => &mut self.branch_prob,
            "LEAF_BASE_SIZE" => &mut self.leaf_base_size,
            "BASE_ROOT_LEN" => &mut self.base_root_len,
            "ROOT_ANGLE_RANGE" => &mut self.root_angle_range,
            _ => &mut self.flower_base_size,
        }
    }
}

fn parse_int(key: &'static str, text: &str) -> Result<usize, ConfigError> {
    text.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: text.to_string(),
    })
}

fn parse_real(key: &'static str, text: &str) -> Result<f64, ConfigError> {
    text.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: text.to_string(),
    })
}
