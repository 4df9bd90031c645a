/// Milliseconds on a page's monotonic timeline.
pub type Millis = u64;

/// Raw interaction events the wiring layer may route into the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawEventKind {
    Input,
    Blur,
    Click,
}

impl RawEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RawEventKind::Input => "input",
            RawEventKind::Blur => "blur",
            RawEventKind::Click => "click",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("input") {
            Some(RawEventKind::Input)
        } else if s.eq_ignore_ascii_case("blur") {
            Some(RawEventKind::Blur)
        } else if s.eq_ignore_ascii_case("click") {
            Some(RawEventKind::Click)
        } else {
            None
        }
    }
}

/// Lifecycle signals observed on a form-like ancestor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    /// A value-change round trip was acknowledged.
    Change,
    Submit,
}

impl LifecycleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleKind::Change => "change",
            LifecycleKind::Submit => "submit",
        }
    }
}
