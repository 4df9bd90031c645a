//! Scheduler configuration.

/// How to resolve an element that declares both a debounce and a throttle value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    /// Signal [`TriggerError::Ambiguous`](crate::TriggerError::Ambiguous).
    #[default]
    Reject,
    PreferDebounce,
    PreferThrottle,
}

impl AmbiguityPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "reject" => Some(AmbiguityPolicy::Reject),
            "prefer-debounce" | "prefer_debounce" => Some(AmbiguityPolicy::PreferDebounce),
            "prefer-throttle" | "prefer_throttle" => Some(AmbiguityPolicy::PreferThrottle),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Attribute consulted for debounce delays (or the blur sentinel).
    pub debounce_attr: String,
    /// Attribute consulted for throttle windows.
    pub throttle_attr: String,
    /// Reserved debounce value selecting immediate mode. Matched ASCII-case-insensitively.
    pub blur_sentinel: String,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_attr: "data-debounce".to_string(),
            throttle_attr: "data-throttle".to_string(),
            blur_sentinel: "blur".to_string(),
            ambiguity: AmbiguityPolicy::Reject,
        }
    }
}

impl SchedulerConfig {
    pub fn with_attrs(mut self, debounce: impl Into<String>, throttle: impl Into<String>) -> Self {
        self.debounce_attr = debounce.into();
        self.throttle_attr = throttle.into();
        self
    }

    pub fn with_blur_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.blur_sentinel = sentinel.into();
        self
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    /// The configured attribute names, ready to hand to `schedule`.
    pub fn attrs(&self) -> TriggerAttrs<'_> {
        TriggerAttrs {
            debounce: &self.debounce_attr,
            throttle: &self.throttle_attr,
        }
    }
}

/// Names of the two attributes the mode resolver reads from an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerAttrs<'a> {
    pub debounce: &'a str,
    pub throttle: &'a str,
}

impl<'a> TriggerAttrs<'a> {
    pub fn new(debounce: &'a str, throttle: &'a str) -> Self {
        Self { debounce, throttle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SchedulerConfig::default()
            .with_attrs("phx-debounce", "phx-throttle")
            .with_ambiguity(AmbiguityPolicy::PreferThrottle);

        assert_eq!(config.attrs(), TriggerAttrs::new("phx-debounce", "phx-throttle"));
        assert_eq!(config.blur_sentinel, "blur");
        assert_eq!(config.ambiguity, AmbiguityPolicy::PreferThrottle);
    }

    #[test]
    fn ambiguity_policy_accepts_both_separators() {
        assert_eq!(
            AmbiguityPolicy::parse("prefer-debounce"),
            Some(AmbiguityPolicy::PreferDebounce)
        );
        assert_eq!(
            AmbiguityPolicy::parse("prefer_throttle"),
            Some(AmbiguityPolicy::PreferThrottle)
        );
        assert_eq!(AmbiguityPolicy::parse("first"), None);
    }
}
