use std::fs::File;
use std::io::BufReader;

use serde::{Deserialize, Serialize};

use crate::{error::Error, flatten::Order};

/// Benchmark parameters, read from YAML. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub tree_size: usize,
    pub lookups: usize,
    pub seed: u64,
    pub order: Order,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            tree_size: 10_000,
            lookups: 1_000,
            seed: 54_783,
            order: Order::PreOrder,
        }
    }
}

impl BenchConfig {
    pub fn load(fname: &str) -> Result<Self, Error> {
        let file = File::open(fname).map_err(|e| Error::FileOpen(fname.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(fname.to_string(), e))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config("<string>".to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let cfg = BenchConfig::from_yaml("{}").unwrap();
        assert_eq!(cfg, BenchConfig::default());
        assert_eq!(cfg.tree_size, 10_000);
        assert_eq!(cfg.seed, 54_783);
    }

    #[test]
    fn partial_override() {
        let cfg = BenchConfig::from_yaml("tree_size: 64\norder: level\n").unwrap();
        assert_eq!(
            cfg,
            BenchConfig {
                tree_size: 64,
                order: Order::LevelOrder,
                ..BenchConfig::default()
            }
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            BenchConfig::from_yaml("tree_size: 1\nspeed: 3\n"),
            Err(Error::Config(..))
        ));
        assert!(matches!(
            BenchConfig::from_yaml("order: sideways\n"),
            Err(Error::Config(..))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            BenchConfig::load("/nonexistent/bench.yaml"),
            Err(Error::FileOpen(..))
        ));
    }
}
