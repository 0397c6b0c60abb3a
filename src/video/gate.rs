/// One-shot "initial content ready" signal.
///
/// The first `open` reports `true`; later calls are ignored so dependents start exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadyGate {
    open: bool,
}

impl ReadyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Already-open gate, for pages without a preloader.
    pub fn opened() -> Self {
        Self { open: true }
    }

    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
