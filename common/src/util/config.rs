use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How workers see the cost grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// Threads mutate one grid through atomic counters.
    #[default]
    Shared,
    /// Every worker owns a private copy; the grid is rebuilt from routes at the end.
    Distributed,
}

impl FromStr for RouteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shared" => Ok(RouteMode::Shared),
            "distributed" => Ok(RouteMode::Distributed),
            other => Err(format!(
                "unknown routing mode '{}', expected 'shared' or 'distributed'",
                other
            )),
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMode::Shared => write!(f, "shared"),
            RouteMode::Distributed => write!(f, "distributed"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_sa_prob")]
    pub sa_prob: f64,
    #[serde(default = "default_sa_iters")]
    pub sa_iters: usize,
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
    #[serde(default)]
    pub mode: RouteMode,
    /// Fixed RNG seed. Wall-clock time is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parallel_candidates: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            sa_prob: default_sa_prob(),
            sa_iters: default_sa_iters(),
            num_workers: default_num_workers(),
            mode: RouteMode::default(),
            seed: None,
            parallel_candidates: false,
        }
    }
}

impl RoutingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.sa_prob) {
            return Err(format!(
                "sa_prob must be within [0, 1], got {}",
                self.sa_prob
            ));
        }
        if self.sa_iters == 0 {
            return Err("sa_iters must be at least 1".to_string());
        }
        if self.num_workers == 0 {
            return Err("num_workers must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_wire_file")]
    pub wire_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wire_file: default_wire_file(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_heatmap")]
    pub heatmap: bool,
    #[serde(default = "default_heatmap_size")]
    pub heatmap_size: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            heatmap: default_heatmap(),
            heatmap_size: default_heatmap_size(),
        }
    }
}

fn default_sa_prob() -> f64 {
    0.1
}

fn default_sa_iters() -> usize {
    5
}

fn default_num_workers() -> usize {
    1
}

fn default_wire_file() -> String {
    "inputs/wires.txt".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_heatmap() -> bool {
    true
}

fn default_heatmap_size() -> u32 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RoutingConfig::default();
        assert_eq!(cfg.sa_prob, 0.1);
        assert_eq!(cfg.sa_iters, 5);
        assert_eq!(cfg.num_workers, 1);
        assert_eq!(cfg.mode, RouteMode::Shared);
        assert!(cfg.seed.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut cfg = RoutingConfig {
            sa_prob: 1.5,
            ..RoutingConfig::default()
        };
        assert!(cfg.validate().unwrap_err().contains("sa_prob"));

        cfg.sa_prob = 1.0;
        cfg.sa_iters = 0;
        assert!(cfg.validate().unwrap_err().contains("sa_iters"));

        cfg.sa_iters = 1;
        cfg.num_workers = 0;
        assert!(cfg.validate().unwrap_err().contains("num_workers"));
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Shared".parse::<RouteMode>(), Ok(RouteMode::Shared));
        assert_eq!(
            "DISTRIBUTED".parse::<RouteMode>(),
            Ok(RouteMode::Distributed)
        );
        assert!("mpi".parse::<RouteMode>().is_err());
        assert_eq!(RouteMode::Distributed.to_string(), "distributed");
    }
}
