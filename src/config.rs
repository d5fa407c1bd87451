use std::path::PathBuf;

const DEFAULT_OUTPUT_BUCKET: &str = "serving-cc-fraud";
const DEFAULT_SCRATCH_DIR: &str = "/tmp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) output_bucket: String,
    pub(crate) scratch_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_bucket: DEFAULT_OUTPUT_BUCKET.to_string(),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
        }
    }
}

impl Config {
    /// Unset or empty variables keep the defaults.
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let defaults = Self::default();
        Self {
            output_bucket: var("OUTPUT_BUCKET").unwrap_or(defaults.output_bucket),
            scratch_dir: var("SCRATCH_DIR").map_or(defaults.scratch_dir, PathBuf::from),
        }
    }
}
