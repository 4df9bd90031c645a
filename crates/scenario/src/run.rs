use crate::error::ScenarioError;
use crate::model::{Action, ConfigOverrides, Scenario};
use crate::text::{diff_lines, escape_text};
use core_types::{Millis, RawEventKind};
use dom::NodeKey;
use page::{LifecycleEvent, Page, PageConfig, PageError, RawEvent};
use std::collections::HashMap;
use std::fmt;
use trigger_core::{AmbiguityPolicy, SchedulerConfig};

/// Something observable that happened while replaying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    Push {
        at: Millis,
        element: String,
        trigger: RawEventKind,
        value: Option<String>,
    },
    /// A dispatch the page rejected; the replay carries on.
    Rejected {
        at: Millis,
        element: String,
        message: String,
    },
    Cancelled {
        at: Millis,
        form: String,
        cancelled: usize,
        excluded: usize,
    },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Push {
                at,
                element,
                trigger,
                value,
            } => {
                write!(f, "{at} push {element} ({})", trigger.as_str())?;
                match value {
                    Some(value) => write!(f, " \"{}\"", escape_text(value)),
                    None => Ok(()),
                }
            }
            TraceEvent::Rejected {
                at,
                element,
                message,
            } => write!(f, "{at} rejected {element}: {message}"),
            TraceEvent::Cancelled {
                at,
                form,
                cancelled,
                excluded,
            } => write!(f, "{at} cancel {form} cancelled={cancelled} excluded={excluded}"),
        }
    }
}

/// A failed `expect` step or trace mismatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub step: Option<usize>,
    pub at: Millis,
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            Some(step) => write!(f, "step {step} @{}ms: {}", self.at, self.message),
            None => write!(f, "@{}ms: {}", self.at, self.message),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Outcome {
    pub name: String,
    pub trace: Vec<TraceEvent>,
    pub failures: Vec<Failure>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn push_count(&self) -> usize {
        self.trace
            .iter()
            .filter(|event| matches!(event, TraceEvent::Push { .. }))
            .count()
    }

    pub fn trace_lines(&self) -> Vec<String> {
        self.trace.iter().map(ToString::to_string).collect()
    }
}

impl Scenario {
    pub fn page_config(&self) -> Result<PageConfig, ScenarioError> {
        build_config(&self.config)
    }

    /// Replay every step against a fresh page.
    ///
    /// Malformed scenarios are errors; rejected dispatches and unmet
    /// expectations are recorded in the outcome instead.
    pub fn run(&self) -> Result<Outcome, ScenarioError> {
        let mut replay = Replay::new(self.page_config()?);
        for decl in &self.elements {
            replay.declare(decl)?;
        }

        let mut outcome = Outcome {
            name: self.name.clone().unwrap_or_default(),
            ..Outcome::default()
        };
        let mut previous = 0;
        for (index, step) in self.steps.iter().enumerate() {
            if step.at < previous {
                return Err(ScenarioError::TimeTravel {
                    step: index,
                    at: step.at,
                    previous,
                });
            }
            previous = step.at;
            replay.page.advance_to(step.at);
            replay.drain_pushes(&mut outcome.trace);
            replay.apply(index, &step.action, &mut outcome)?;
            replay.drain_pushes(&mut outcome.trace);
        }

        if let Some(expected) = &self.trace {
            let actual = outcome.trace_lines();
            if *expected != actual {
                outcome.failures.push(Failure {
                    step: None,
                    at: replay.page.now(),
                    message: format!("trace mismatch\n{}", diff_lines(expected, &actual)),
                });
            }
        }
        log::debug!(
            target: "scenario",
            "{}: {} events, {} failures",
            outcome.name,
            outcome.trace.len(),
            outcome.failures.len()
        );
        Ok(outcome)
    }
}

fn build_config(overrides: &ConfigOverrides) -> Result<PageConfig, ScenarioError> {
    let mut scheduler = SchedulerConfig::default();
    if let Some(attr) = &overrides.debounce_attr {
        scheduler.debounce_attr = attr.clone();
    }
    if let Some(attr) = &overrides.throttle_attr {
        scheduler.throttle_attr = attr.clone();
    }
    if let Some(sentinel) = &overrides.blur_sentinel {
        scheduler = scheduler.with_blur_sentinel(sentinel.as_str());
    }
    if let Some(raw) = &overrides.ambiguity {
        let policy = AmbiguityPolicy::parse(raw).ok_or_else(|| ScenarioError::InvalidConfig {
            field: "ambiguity",
            value: raw.clone(),
        })?;
        scheduler = scheduler.with_ambiguity(policy);
    }
    Ok(PageConfig {
        scheduler,
        flush_on_blur: overrides.flush_on_blur.unwrap_or(false),
    })
}

struct Replay {
    page: Page,
    ids: HashMap<String, NodeKey>,
    names: HashMap<NodeKey, String>,
    seen_pushes: usize,
    rejected: usize,
}

impl Replay {
    fn new(config: PageConfig) -> Self {
        Self {
            page: Page::new(config),
            ids: HashMap::new(),
            names: HashMap::new(),
            seen_pushes: 0,
            rejected: 0,
        }
    }

    fn declare(&mut self, decl: &crate::model::ElementDecl) -> Result<(), ScenarioError> {
        if self.ids.contains_key(&decl.id) {
            return Err(ScenarioError::DuplicateElement(decl.id.clone()));
        }
        let parent = match &decl.parent {
            Some(parent) => self.lookup(parent)?,
            None => self.page.root(),
        };
        let attributes = decl
            .attributes
            .iter()
            .map(|(name, value)| (name.clone(), Some(value.clone())))
            .collect();
        let key = self
            .page
            .append_element(parent, &decl.tag, attributes)
            .map_err(ScenarioError::Setup)?;
        for event in &decl.listen {
            let kind = RawEventKind::parse(event).ok_or_else(|| ScenarioError::UnknownEvent {
                element: decl.id.clone(),
                event: event.clone(),
            })?;
            self.page.listen(key, kind).map_err(ScenarioError::Setup)?;
        }
        self.ids.insert(decl.id.clone(), key);
        self.names.insert(key, decl.id.clone());
        Ok(())
    }

    fn lookup(&self, id: &str) -> Result<NodeKey, ScenarioError> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownElement(id.to_string()))
    }

    fn name_of(&self, key: NodeKey) -> String {
        self.names
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn apply(
        &mut self,
        index: usize,
        action: &Action,
        outcome: &mut Outcome,
    ) -> Result<(), ScenarioError> {
        let at = self.page.now();
        match action {
            Action::Input { target, value } => {
                self.raw(target, RawEvent::Input(value.clone()), &mut outcome.trace)
            }
            Action::Blur { target } => self.raw(target, RawEvent::Blur, &mut outcome.trace),
            Action::Click { target } => self.raw(target, RawEvent::Click, &mut outcome.trace),
            Action::SetValue { target, value } => {
                let key = self.lookup(target)?;
                let result = self.page.set_value(key, value);
                self.note(target, result, &mut outcome.trace);
                Ok(())
            }
            Action::SetAttribute {
                target,
                name,
                value,
            } => {
                let key = self.lookup(target)?;
                let result = self.page.set_attribute(key, name, value);
                self.note(target, result, &mut outcome.trace);
                Ok(())
            }
            Action::Change { form, triggered_by } => {
                let triggered_by = match triggered_by {
                    Some(id) => Some(self.lookup(id)?),
                    None => None,
                };
                self.lifecycle(form, LifecycleEvent::Change { triggered_by }, &mut outcome.trace)
            }
            Action::Submit { form } => {
                self.lifecycle(form, LifecycleEvent::Submit, &mut outcome.trace)
            }
            Action::Remove { target } => {
                let key = self.lookup(target)?;
                let result = self.page.remove(key).map(|_| ());
                self.note(target, result, &mut outcome.trace);
                Ok(())
            }
            Action::Expect {
                pushes,
                errors,
                target,
                value,
            } => {
                let mut fail = |message: String| {
                    outcome.failures.push(Failure {
                        step: Some(index),
                        at,
                        message,
                    })
                };
                if let Some(expected) = pushes
                    && *expected != self.page.push_count()
                {
                    fail(format!(
                        "expected {expected} pushes, saw {}",
                        self.page.push_count()
                    ));
                }
                if let Some(expected) = errors
                    && *expected != self.rejected
                {
                    fail(format!(
                        "expected {expected} rejected dispatches, saw {}",
                        self.rejected
                    ));
                }
                if let Some(target) = target {
                    let key = self.lookup(target)?;
                    let actual = self.page.value(key);
                    if let Some(expected) = value
                        && actual != Some(expected.as_str())
                    {
                        fail(format!("expected {target} to hold {expected:?}, saw {actual:?}"));
                    }
                }
                Ok(())
            }
        }
    }

    fn raw(
        &mut self,
        target: &str,
        event: RawEvent,
        trace: &mut Vec<TraceEvent>,
    ) -> Result<(), ScenarioError> {
        let key = self.lookup(target)?;
        let result = self.page.dispatch(key, event).map(|_| ());
        self.note(target, result, trace);
        Ok(())
    }

    fn lifecycle(
        &mut self,
        form: &str,
        event: LifecycleEvent,
        trace: &mut Vec<TraceEvent>,
    ) -> Result<(), ScenarioError> {
        let key = self.lookup(form)?;
        match self.page.dispatch_lifecycle(key, event) {
            Ok(report) => trace.push(TraceEvent::Cancelled {
                at: self.page.now(),
                form: form.to_string(),
                cancelled: report.cancelled(),
                excluded: report.excluded,
            }),
            Err(err) => self.note(form, Err(err), trace),
        }
        Ok(())
    }

    fn note(&mut self, target: &str, result: Result<(), PageError>, trace: &mut Vec<TraceEvent>) {
        if let Err(err) = result {
            log::debug!(target: "scenario", "{target}: {err}");
            self.rejected += 1;
            trace.push(TraceEvent::Rejected {
                at: self.page.now(),
                element: target.to_string(),
                message: err.to_string(),
            });
        }
    }

    fn drain_pushes(&mut self, trace: &mut Vec<TraceEvent>) {
        let pushes = self.page.pushes();
        let fresh: Vec<TraceEvent> = pushes[self.seen_pushes..]
            .iter()
            .map(|push| TraceEvent::Push {
                at: push.at,
                element: self.name_of(push.element),
                trigger: push.trigger,
                value: push.value.clone(),
            })
            .collect();
        self.seen_pushes = pushes.len();
        trace.extend(fresh);
    }
}
