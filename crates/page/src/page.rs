use crate::error::PageError;
use crate::event::{LifecycleEvent, RawEvent};
use crate::input_store::InputValueStore;
use core_types::{Millis, RawEventKind};
use dom::{Attribute, Document, DomError, NodeKey};
use std::collections::HashMap;
use trigger_core::{
    CancelReport, CancelRequest, Callback, Clock, Dispatch, ManualClock, SchedulerConfig,
    TriggerScheduler, TurnCtx,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageConfig {
    pub scheduler: SchedulerConfig,
    /// A blur on a debounced control fires its pending callback right away.
    pub flush_on_blur: bool,
}

/// One callback invocation, as the server would have seen it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Push {
    pub element: NodeKey,
    /// The raw event kind whose listener scheduled the callback.
    pub trigger: RawEventKind,
    /// The element's value when the callback ran, not when it was scheduled.
    pub value: Option<String>,
    pub at: Millis,
}

/// Page state reachable from scheduled callbacks.
#[derive(Debug, Default)]
pub struct PageState {
    pub values: InputValueStore,
    pushes: Vec<Push>,
    now: Millis,
}

impl PageState {
    pub fn pushes(&self) -> &[Push] {
        &self.pushes
    }

    fn record_push(&mut self, element: NodeKey, trigger: RawEventKind) {
        let push = Push {
            element,
            trigger,
            value: self.values.get(element).map(str::to_string),
            at: self.now,
        };
        log::debug!(target: "page.dispatch", "push {push:?}");
        self.pushes.push(push);
    }
}

/// A single document plus the event wiring around the trigger scheduler.
///
/// Time is virtual: nothing happens between calls, and debounce deadlines
/// only fire from [`Page::advance`] / [`Page::advance_to`].
#[derive(Debug)]
pub struct Page {
    config: PageConfig,
    doc: Document,
    state: PageState,
    scheduler: TriggerScheduler<PageState>,
    clock: ManualClock,
    listeners: HashMap<NodeKey, Vec<RawEventKind>>,
}

impl Page {
    pub fn new(config: PageConfig) -> Self {
        let scheduler = TriggerScheduler::new(config.scheduler.clone());
        Self {
            config,
            doc: Document::new(),
            state: PageState::default(),
            scheduler,
            clock: ManualClock::new(),
            listeners: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TriggerScheduler<PageState> {
        &self.scheduler
    }

    pub fn root(&self) -> NodeKey {
        self.doc.root()
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Append an element; a `value` attribute seeds the control's value.
    pub fn append_element(
        &mut self,
        parent: NodeKey,
        name: &str,
        attributes: Vec<Attribute>,
    ) -> Result<NodeKey, PageError> {
        let key = self.doc.append_element(parent, name, attributes)?;
        if let Some(initial) = self.doc.attr(key, "value") {
            self.state.values.ensure_initial(key, initial.to_string());
        }
        Ok(key)
    }

    /// Route `kind` events on `element` into the scheduler.
    pub fn listen(&mut self, element: NodeKey, kind: RawEventKind) -> Result<(), PageError> {
        self.ensure_connected(element)?;
        let kinds = self.listeners.entry(element).or_default();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
        Ok(())
    }

    pub fn value(&self, element: NodeKey) -> Option<&str> {
        self.state.values.get(element)
    }

    /// Overwrite a value without dispatching anything, the way a lifecycle
    /// handler would.
    pub fn set_value(&mut self, element: NodeKey, value: &str) -> Result<(), PageError> {
        self.ensure_connected(element)?;
        self.state.values.set(element, value.to_string());
        Ok(())
    }

    /// Set or replace an attribute. A trigger mode that already resolved stays
    /// cached; one that failed to resolve is retried on the next event.
    pub fn set_attribute(
        &mut self,
        element: NodeKey,
        name: &str,
        value: &str,
    ) -> Result<(), PageError> {
        self.ensure_connected(element)?;
        self.doc.set_attr(element, name, Some(value.to_string()))?;
        Ok(())
    }

    pub fn pushes(&self) -> &[Push] {
        self.state.pushes()
    }

    pub fn push_count(&self) -> usize {
        self.state.pushes.len()
    }

    /// Deliver a raw interaction event at the current time.
    ///
    /// Returns `None` when no listener routes this event kind on `element`.
    pub fn dispatch(
        &mut self,
        element: NodeKey,
        event: RawEvent,
    ) -> Result<Option<Dispatch>, PageError> {
        self.ensure_connected(element)?;
        let now = self.clock.now();
        let kind = event.kind();
        self.state.now = now;
        log::trace!(
            target: "page.dispatch",
            "<{}> {element} {} @{now}",
            self.doc.name(element).unwrap_or("?"),
            kind.as_str()
        );

        if let RawEvent::Input(value) = event {
            self.state.values.set(element, value);
        }

        if kind == RawEventKind::Blur && self.config.flush_on_blur {
            let flushed = self.scheduler.flush(
                TurnCtx::new(&self.doc, now, &mut self.state),
                element.into(),
            );
            if flushed {
                log::debug!(target: "page.dispatch", "{element}: flushed on blur");
            }
        }

        if !self.is_listening(element, kind) {
            return Ok(None);
        }

        let callback: Callback<PageState> =
            Box::new(move |state: &mut PageState| state.record_push(element, kind));
        let dispatch = self.scheduler.schedule(
            TurnCtx::new(&self.doc, now, &mut self.state),
            element.into(),
            self.config.scheduler.attrs(),
            callback,
        )?;
        Ok(Some(dispatch))
    }

    /// Deliver a lifecycle event observed on `form`.
    pub fn dispatch_lifecycle(
        &mut self,
        form: NodeKey,
        event: LifecycleEvent,
    ) -> Result<CancelReport, PageError> {
        self.ensure_connected(form)?;
        log::trace!(
            target: "page.dispatch",
            "{form} {} @{}",
            event.kind().as_str(),
            self.clock.now()
        );
        let request = match event.originator() {
            Some(origin) => CancelRequest::excluding(form.into(), origin.into()),
            None => CancelRequest::all(form.into()),
        };
        Ok(self.scheduler.cancel(&self.doc, request))
    }

    /// Let `ms` of virtual time pass. Returns how many callbacks fired.
    pub fn advance(&mut self, ms: Millis) -> usize {
        let target = self.clock.now().saturating_add(ms);
        self.advance_to(target)
    }

    /// Move virtual time to `target`, running each debounce at its own
    /// deadline along the way.
    pub fn advance_to(&mut self, target: Millis) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.scheduler.next_deadline().filter(|&d| d <= target) {
            let now = self.clock.advance_to(deadline);
            fired += self.run_timers(now);
        }
        let now = self.clock.advance_to(target);
        fired + self.run_timers(now)
    }

    /// Remove `element` and its subtree from the document.
    pub fn remove(&mut self, element: NodeKey) -> Result<usize, PageError> {
        let removed = self.doc.remove(element)?;
        for key in &removed {
            self.state.values.remove(*key);
            self.listeners.remove(key);
        }
        self.scheduler.prune(&self.doc);
        Ok(removed.len())
    }

    fn run_timers(&mut self, now: Millis) -> usize {
        self.state.now = now;
        self.scheduler
            .run_due(TurnCtx::new(&self.doc, now, &mut self.state))
    }

    fn is_listening(&self, element: NodeKey, kind: RawEventKind) -> bool {
        self.listeners
            .get(&element)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    fn ensure_connected(&self, element: NodeKey) -> Result<(), DomError> {
        if self.doc.is_connected(element) {
            Ok(())
        } else {
            Err(DomError::StaleKey(element))
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(PageConfig::default())
    }
}
