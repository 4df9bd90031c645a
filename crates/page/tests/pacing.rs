use core_types::RawEventKind;
use dom::{Attribute, DomError, NodeKey};
use page::{LifecycleEvent, Page, PageConfig, PageError, RawEvent};
use trigger_core::{Dispatch, TimingPhase, TriggerError};

fn attr(k: &str, v: &str) -> Attribute {
    (k.to_string(), Some(v.to_string()))
}

struct Form {
    page: Page,
    form: NodeKey,
    blur: NodeKey,
    debounce: NodeKey,
    throttle: NodeKey,
    button: NodeKey,
}

/// `<form>` with a blur-mode input, a 100ms debounced input, a 100ms
/// throttled input and a 100ms throttled button.
fn form_with(config: PageConfig) -> Form {
    let mut page = Page::new(config);
    let root = page.root();
    let form = page.append_element(root, "form", Vec::new()).unwrap();
    let blur = page
        .append_element(form, "input", vec![attr("name", "blur"), attr("data-debounce", "blur")])
        .unwrap();
    let debounce = page
        .append_element(
            form,
            "input",
            vec![attr("name", "debounce-100"), attr("data-debounce", "100")],
        )
        .unwrap();
    let throttle = page
        .append_element(
            form,
            "input",
            vec![attr("name", "throttle-100"), attr("data-throttle", "100")],
        )
        .unwrap();
    let button = page
        .append_element(form, "button", vec![attr("data-throttle", "100")])
        .unwrap();

    page.listen(blur, RawEventKind::Blur).unwrap();
    page.listen(debounce, RawEventKind::Input).unwrap();
    page.listen(throttle, RawEventKind::Input).unwrap();
    page.listen(button, RawEventKind::Click).unwrap();

    Form {
        page,
        form,
        blur,
        debounce,
        throttle,
        button,
    }
}

fn form() -> Form {
    form_with(PageConfig::default())
}

fn input(page: &mut Page, el: NodeKey, value: &str) -> Option<Dispatch> {
    page.dispatch(el, RawEvent::Input(value.to_string())).unwrap()
}

#[test]
fn blur_mode_triggers_on_every_blur() {
    let Form { mut page, blur, .. } = form();

    assert_eq!(page.dispatch(blur, RawEvent::Blur).unwrap(), Some(Dispatch::Fired));
    assert_eq!(page.push_count(), 1);

    for _ in 0..3 {
        page.dispatch(blur, RawEvent::Blur).unwrap();
    }
    assert_eq!(page.push_count(), 4);
}

#[test]
fn debounce_fires_last_value_after_quiet_period() {
    let Form {
        mut page, debounce, ..
    } = form();

    input(&mut page, debounce, "one");
    page.advance(10);
    input(&mut page, debounce, "two");
    page.advance(10);
    input(&mut page, debounce, "three");

    assert_eq!(page.advance(99), 0);
    assert_eq!(page.push_count(), 0);
    assert_eq!(page.advance(1), 1);
    assert_eq!(page.now(), 120);

    let push = &page.pushes()[0];
    assert_eq!(push.element, debounce);
    assert_eq!(push.value.as_deref(), Some("three"));
    assert_eq!(push.at, 120);
    assert_eq!(page.value(debounce), Some("three"));
}

#[test]
fn debounce_same_tick_burst_then_second_burst() {
    let Form {
        mut page, debounce, ..
    } = form();

    for v in ["one", "two", "three"] {
        input(&mut page, debounce, v);
    }
    page.advance(100);
    assert_eq!(page.push_count(), 1);
    assert_eq!(page.value(debounce), Some("three"));

    for v in ["four", "five", "six"] {
        input(&mut page, debounce, v);
    }
    page.advance(100);
    assert_eq!(page.push_count(), 2);
    assert_eq!(page.pushes()[1].value.as_deref(), Some("six"));
}

#[test]
fn change_cancels_pending_debounce() {
    let Form {
        mut page,
        form,
        debounce,
        ..
    } = form();

    input(&mut page, debounce, "changed");
    let report = page
        .dispatch_lifecycle(form, LifecycleEvent::Change { triggered_by: None })
        .unwrap();
    assert_eq!(report.debounces_discarded, 1);
    page.set_value(debounce, "phx-changed").unwrap();

    page.advance(100);
    assert_eq!(page.push_count(), 0);
    assert_eq!(page.value(debounce), Some("phx-changed"));

    input(&mut page, debounce, "changed again");
    page.advance(100);
    assert_eq!(page.push_count(), 1);
    assert_eq!(page.value(debounce), Some("changed again"));
}

#[test]
fn submit_cancels_pending_debounce() {
    let Form {
        mut page,
        form,
        debounce,
        ..
    } = form();

    input(&mut page, debounce, "changed");
    page.dispatch_lifecycle(form, LifecycleEvent::Submit).unwrap();
    page.set_value(debounce, "submitted").unwrap();

    page.advance(100);
    assert_eq!(page.push_count(), 0);
    assert_eq!(page.value(debounce), Some("submitted"));

    input(&mut page, debounce, "changed again");
    page.advance(100);
    assert_eq!(page.push_count(), 1);
}

#[test]
fn throttled_button_fires_immediately_then_after_window() {
    let Form {
        mut page, button, ..
    } = form();

    for _ in 0..3 {
        page.dispatch(button, RawEvent::Click).unwrap();
    }
    assert_eq!(page.push_count(), 1);

    page.advance(100);
    assert_eq!(page.push_count(), 1);

    let outcomes: Vec<_> = (0..3)
        .map(|_| page.dispatch(button, RawEvent::Click).unwrap())
        .collect();
    assert_eq!(
        outcomes,
        vec![
            Some(Dispatch::Fired),
            Some(Dispatch::Dropped),
            Some(Dispatch::Dropped)
        ]
    );

    page.advance(100);
    assert_eq!(page.push_count(), 2);
}

#[test]
fn change_from_another_control_unlocks_throttle() {
    let Form {
        mut page,
        form,
        debounce,
        throttle,
        ..
    } = form();

    input(&mut page, throttle, "changed");
    input(&mut page, throttle, "changed2");
    assert_eq!(page.push_count(), 1);
    assert_eq!(page.pushes()[0].value.as_deref(), Some("changed"));

    page.dispatch_lifecycle(
        form,
        LifecycleEvent::Change {
            triggered_by: Some(debounce),
        },
    )
    .unwrap();
    page.set_value(throttle, "phx-changed").unwrap();
    assert_eq!(page.push_count(), 1);

    assert_eq!(input(&mut page, throttle, "changed3"), Some(Dispatch::Fired));
    page.advance(100);
    assert_eq!(page.push_count(), 2);
    assert_eq!(page.value(throttle), Some("changed3"));
}

#[test]
fn change_spares_the_originating_control() {
    let Form {
        mut page,
        form,
        debounce,
        throttle,
        ..
    } = form();

    input(&mut page, throttle, "a");
    input(&mut page, debounce, "typed");

    let report = page
        .dispatch_lifecycle(
            form,
            LifecycleEvent::Change {
                triggered_by: Some(debounce),
            },
        )
        .unwrap();
    assert_eq!(report.excluded, 1);
    assert_eq!(report.throttles_unlocked, 1);
    assert_eq!(
        page.scheduler().state_of(debounce.into()),
        TimingPhase::DebouncePending { deadline: 100 }
    );

    page.advance(100);
    assert_eq!(page.push_count(), 2);
    assert_eq!(page.pushes()[1].value.as_deref(), Some("typed"));
}

#[test]
fn submit_unlocks_throttle() {
    let Form {
        mut page,
        form,
        throttle,
        ..
    } = form();

    input(&mut page, throttle, "changed");
    input(&mut page, throttle, "changed2");
    page.dispatch_lifecycle(form, LifecycleEvent::Submit).unwrap();
    page.set_value(throttle, "submitted").unwrap();
    assert_eq!(page.push_count(), 1);

    input(&mut page, throttle, "changed3");
    page.advance(100);
    assert_eq!(page.push_count(), 2);
    assert_eq!(page.value(throttle), Some("changed3"));
}

#[test]
fn lifecycle_on_another_form_leaves_state_alone() {
    let Form {
        mut page, debounce, ..
    } = form();
    let root = page.root();
    let other = page.append_element(root, "form", Vec::new()).unwrap();

    input(&mut page, debounce, "kept");
    let report = page.dispatch_lifecycle(other, LifecycleEvent::Submit).unwrap();
    assert_eq!(report.cancelled(), 0);

    page.advance(100);
    assert_eq!(page.push_count(), 1);
}

#[test]
fn removed_control_never_fires() {
    let Form {
        mut page, debounce, ..
    } = form();

    input(&mut page, debounce, "doomed");
    assert_eq!(page.remove(debounce).unwrap(), 1);
    assert_eq!(page.scheduler().pending_len(), 0);

    page.advance(500);
    assert_eq!(page.push_count(), 0);
    assert_eq!(
        page.dispatch(debounce, RawEvent::Input("x".to_string())),
        Err(PageError::Dom(DomError::StaleKey(debounce)))
    );
}

#[test]
fn flush_on_blur_sends_pending_debounce_early() {
    let config = PageConfig {
        flush_on_blur: true,
        ..PageConfig::default()
    };
    let Form {
        mut page, debounce, ..
    } = form_with(config);

    input(&mut page, debounce, "typed");
    page.advance(30);
    assert_eq!(page.dispatch(debounce, RawEvent::Blur).unwrap(), None);
    assert_eq!(page.push_count(), 1);
    assert_eq!(page.pushes()[0].at, 30);
    assert_eq!(page.pushes()[0].trigger, RawEventKind::Input);

    page.advance(100);
    assert_eq!(page.push_count(), 1);
}

#[test]
fn unconfigured_control_reports_missing_trigger() {
    let mut page = Page::default();
    let root = page.root();
    let plain = page.append_element(root, "input", Vec::new()).unwrap();
    page.listen(plain, RawEventKind::Input).unwrap();

    let err = page
        .dispatch(plain, RawEvent::Input("x".to_string()))
        .unwrap_err();
    assert_eq!(
        err,
        PageError::Trigger(TriggerError::MissingTrigger {
            element: plain.into()
        })
    );
    assert_eq!(page.value(plain), Some("x"));
    assert_eq!(page.push_count(), 0);

    page.set_attribute(plain, "data-debounce", "50").unwrap();
    assert_eq!(
        input(&mut page, plain, "y"),
        Some(Dispatch::Armed { deadline: 50 })
    );
    assert_eq!(page.advance(50), 1);
    assert_eq!(page.pushes()[0].value.as_deref(), Some("y"));
}

#[test]
fn events_without_listener_only_update_values() {
    let Form {
        mut page, blur, ..
    } = form();

    assert_eq!(input(&mut page, blur, "typed"), None);
    assert_eq!(page.value(blur), Some("typed"));
    assert_eq!(page.push_count(), 0);
}
