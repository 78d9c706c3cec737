//! Process wide settings used when building and reconciling GPRs
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Separator used in namespaced feature references (e.g. `"ws/obj/feature_id"`),
    /// only the final segment is used as the feature id
    pub feature_ref_separator: char,
    /// Whether redundant proteins are removed after two reaction GPRs are merged
    pub reduce_after_merge: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            feature_ref_separator: '/',
            reduce_after_merge: true,
        }
    }
}

impl Configuration {
    /// Get a copy of the current configuration
    ///
    /// If the lock has been poisoned, the default configuration is returned instead.
    pub fn current() -> Configuration {
        CONFIGURATION
            .read()
            .map(|config| config.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(config.feature_ref_separator, '/');
        assert!(config.reduce_after_merge);
    }
}
