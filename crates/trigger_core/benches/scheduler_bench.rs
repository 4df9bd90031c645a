use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::collections::HashMap;
use trigger_core::{
    CancelRequest, ElementId, ElementTree, SchedulerConfig, TriggerScheduler, TurnCtx,
};

const FIELDS: u64 = 256;

/// One form with `FIELDS` children, alternating debounce and throttle.
struct FlatForm {
    attrs: HashMap<ElementId, (&'static str, &'static str)>,
}

const FORM: ElementId = ElementId::from_raw(0);

impl FlatForm {
    fn new() -> Self {
        let attrs = (1..=FIELDS)
            .map(|i| {
                let decl = if i % 2 == 0 {
                    ("data-debounce", "100")
                } else {
                    ("data-throttle", "100")
                };
                (ElementId::from_raw(i), decl)
            })
            .collect();
        Self { attrs }
    }
}

impl ElementTree for FlatForm {
    fn is_live(&self, id: ElementId) -> bool {
        id == FORM || self.attrs.contains_key(&id)
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.attrs
            .get(&id)
            .filter(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        (id != FORM && self.attrs.contains_key(&id)).then_some(FORM)
    }
}

fn bench_typing_burst(c: &mut Criterion) {
    let form = FlatForm::new();
    let config = SchedulerConfig::default();

    c.bench_function("schedule_typing_burst_256x8", |b| {
        b.iter_batched(
            || TriggerScheduler::<u64>::new(config.clone()),
            |mut sched| {
                let mut fired = 0u64;
                for now in 0..8 {
                    for i in 1..=FIELDS {
                        let _ = sched.schedule(
                            TurnCtx::new(&form, now * 10, &mut fired),
                            ElementId::from_raw(i),
                            config.attrs(),
                            Box::new(|n: &mut u64| *n += 1),
                        );
                    }
                }
                sched.run_due(TurnCtx::new(&form, 1_000, &mut fired));
                black_box(fired)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_cancel_sweep(c: &mut Criterion) {
    let form = FlatForm::new();
    let config = SchedulerConfig::default();

    c.bench_function("cancel_sweep_256", |b| {
        b.iter_batched(
            || {
                let mut sched = TriggerScheduler::<u64>::new(config.clone());
                let mut fired = 0u64;
                for i in 1..=FIELDS {
                    let _ = sched.schedule(
                        TurnCtx::new(&form, 0, &mut fired),
                        ElementId::from_raw(i),
                        config.attrs(),
                        Box::new(|n: &mut u64| *n += 1),
                    );
                }
                sched
            },
            |mut sched| {
                let request = CancelRequest::excluding(FORM, ElementId::from_raw(2));
                let report = sched.cancel(&form, request);
                black_box(report)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_typing_burst, bench_cancel_sweep);
criterion_main!(benches);
