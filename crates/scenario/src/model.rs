//! On-disk scenario format.
//!
//! ```toml
//! name = "debounce coalesces a burst"
//!
//! [config]
//! flush_on_blur = false
//!
//! [[element]]
//! id = "form"
//! tag = "form"
//!
//! [[element]]
//! id = "query"
//! parent = "form"
//! attributes = { "data-debounce" = "100" }
//! listen = ["input"]
//!
//! [[step]]
//! at = 0
//! action = "input"
//! target = "query"
//! value = "one"
//!
//! [[step]]
//! at = 100
//! action = "expect"
//! pushes = 1
//! ```

use core_types::Millis;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub config: ConfigOverrides,
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementDecl>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
    /// Full expected trace, one rendered event per line.
    #[serde(default)]
    pub trace: Option<Vec<String>>,
}

/// Any field left out keeps its default.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub debounce_attr: Option<String>,
    pub throttle_attr: Option<String>,
    pub blur_sentinel: Option<String>,
    /// `reject`, `prefer-debounce` or `prefer-throttle`.
    pub ambiguity: Option<String>,
    pub flush_on_blur: Option<bool>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDecl {
    pub id: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Another element's `id`; the document root when omitted.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Raw event kinds routed into the scheduler.
    #[serde(default)]
    pub listen: Vec<String>,
}

fn default_tag() -> String {
    "input".to_string()
}

/// Unknown keys are rejected by [`Action`]; `flatten` leaves `Step` itself
/// unable to deny them.
#[derive(Clone, Debug, Deserialize)]
pub struct Step {
    /// Absolute virtual time; steps must not go backwards.
    pub at: Millis,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
    Input {
        target: String,
        value: String,
    },
    Blur {
        target: String,
    },
    Click {
        target: String,
    },
    /// Overwrite a value without dispatching, like a lifecycle handler does.
    SetValue {
        target: String,
        value: String,
    },
    /// Set an attribute on a control, e.g. to repair a rejected trigger.
    SetAttribute {
        target: String,
        name: String,
        value: String,
    },
    Change {
        form: String,
        #[serde(default)]
        triggered_by: Option<String>,
    },
    Submit {
        form: String,
    },
    Remove {
        target: String,
    },
    Expect {
        /// Total pushes so far.
        #[serde(default)]
        pushes: Option<usize>,
        /// Total rejected dispatches so far.
        #[serde(default)]
        errors: Option<usize>,
        #[serde(default)]
        target: Option<String>,
        /// Expected current value of `target`.
        #[serde(default)]
        value: Option<String>,
    },
}
