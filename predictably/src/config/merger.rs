//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::ConfigUpdate;

/// Merges configuration updates according to precedence rules.
///
/// # Examples
///
/// ```
/// use predictably::config::{ConfigMerger, ConfigUpdate, DisplayMode};
/// use predictably::Value;
///
/// let mut result = ConfigUpdate::new().display(DisplayMode::Text);
/// let high = ConfigUpdate::new().display(DisplayMode::Diagram);
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.get("display"), Some(&Value::from("diagram")));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources into a single update.
    ///
    /// Sources are applied in order of ascending precedence, so a later source
    /// with equal precedence wins.
    #[must_use]
    pub fn merge(mut sources: Vec<ConfigSource>) -> ConfigUpdate {
        sources.sort_by_key(|source| source.precedence);

        let mut result = ConfigUpdate::new();
        for source in &sources {
            Self::merge_into(&mut result, &source.update);
        }
        result
    }

    /// Merges `source` into `target`; set entries of `source` overwrite,
    /// unset entries never do.
    pub fn merge_into(target: &mut ConfigUpdate, source: &ConfigUpdate) {
        for (name, value) in source.set_entries() {
            target.insert(name, value.clone());
        }
    }
}
