use tracing::warn;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;
pub const DEFAULT_MAX_DEPTH: usize = 64;

const CACHE_CAPACITY_VAR: &str = "REMX_CACHE_CAPACITY";
const MAX_DEPTH_VAR: &str = "REMX_MAX_DEPTH";

/// Settings for a [`PatternCache`](crate::PatternCache) and the patterns it hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of distinct pattern texts kept before the least recently used is dropped.
    pub cache_capacity: usize,
    /// How deeply checkables may nest during a single match.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Reads `REMX_CACHE_CAPACITY` and `REMX_MAX_DEPTH`, falling back to the
    /// defaults for anything unset or invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            cache_capacity: positive_or(
                CACHE_CAPACITY_VAR,
                lookup(CACHE_CAPACITY_VAR),
                DEFAULT_CACHE_CAPACITY,
            ),
            max_depth: positive_or(MAX_DEPTH_VAR, lookup(MAX_DEPTH_VAR), DEFAULT_MAX_DEPTH),
        }
    }
}

fn positive_or(key: &str, raw: Option<String>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            warn!(key, value = %raw, default, "ignoring invalid configuration value");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        Config::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(from_pairs(&[]), Config::default());
    }

    #[test]
    fn reads_values() {
        let cfg = from_pairs(&[("REMX_CACHE_CAPACITY", "16"), ("REMX_MAX_DEPTH", " 8 ")]);
        assert_eq!(cfg.cache_capacity, 16);
        assert_eq!(cfg.max_depth, 8);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = from_pairs(&[("REMX_CACHE_CAPACITY", "lots"), ("REMX_MAX_DEPTH", "0")]);
        assert_eq!(cfg, Config::default());
    }
}
