//! Mode resolution: which of the three trigger modes an element runs in.

use crate::config::{AmbiguityPolicy, SchedulerConfig, TriggerAttrs};
use crate::error::TriggerError;
use crate::id::ElementId;
use crate::tree::ElementTree;
use core_types::Millis;

/// Trigger mode of a single element, fixed for the element's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerSpec {
    /// Fire on every call, synchronously.
    Immediate,
    /// Trailing-edge debounce with the given delay.
    Delayed(Millis),
    /// Leading-edge-only throttle with the given window.
    Throttled(Millis),
}

/// Derive the trigger mode from the element's own attributes.
///
/// No ancestor lookup takes place. Values are trimmed of ASCII whitespace
/// before parsing; the blur sentinel is only recognized on the debounce
/// attribute, where it takes precedence over any throttle declaration.
pub fn resolve<T: ElementTree + ?Sized>(
    tree: &T,
    element: ElementId,
    attrs: TriggerAttrs<'_>,
    config: &SchedulerConfig,
) -> Result<TriggerSpec, TriggerError> {
    let debounce = tree.attribute(element, attrs.debounce);
    let throttle = tree.attribute(element, attrs.throttle);

    match (debounce, throttle) {
        (None, None) => Err(TriggerError::MissingTrigger { element }),
        (Some(d), None) => parse_debounce(element, attrs.debounce, d, config),
        (None, Some(t)) => parse_throttle(element, attrs.throttle, t),
        (Some(d), Some(_)) if is_sentinel(d, config) => Ok(TriggerSpec::Immediate),
        (Some(d), Some(t)) => {
            // Both must be well-formed before the policy gets a say.
            let debounce_spec = parse_debounce(element, attrs.debounce, d, config)?;
            let throttle_spec = parse_throttle(element, attrs.throttle, t)?;
            match config.ambiguity {
                AmbiguityPolicy::Reject => Err(TriggerError::Ambiguous {
                    element,
                    debounce: d.to_string(),
                    throttle: t.to_string(),
                }),
                AmbiguityPolicy::PreferDebounce => Ok(debounce_spec),
                AmbiguityPolicy::PreferThrottle => Ok(throttle_spec),
            }
        }
    }
}

fn parse_debounce(
    element: ElementId,
    attr: &str,
    value: &str,
    config: &SchedulerConfig,
) -> Result<TriggerSpec, TriggerError> {
    if is_sentinel(value, config) {
        return Ok(TriggerSpec::Immediate);
    }
    parse_millis(value)
        .map(TriggerSpec::Delayed)
        .ok_or_else(|| invalid(element, attr, value))
}

fn is_sentinel(value: &str, config: &SchedulerConfig) -> bool {
    value.trim().eq_ignore_ascii_case(&config.blur_sentinel)
}

fn parse_throttle(
    element: ElementId,
    attr: &str,
    value: &str,
) -> Result<TriggerSpec, TriggerError> {
    parse_millis(value)
        .map(TriggerSpec::Throttled)
        .ok_or_else(|| invalid(element, attr, value))
}

fn invalid(element: ElementId, attr: &str, value: &str) -> TriggerError {
    TriggerError::InvalidValue {
        element,
        attr: attr.to_string(),
        value: value.to_string(),
    }
}

/// Base-10 digits only: no sign, no unit suffix, no fraction.
pub(crate) fn parse_millis(value: &str) -> Option<Millis> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
