/// Prompt shown before a goal is deleted.
pub const DELETE_PROMPT: &str = "Delete this goal?";

/// Blocking yes/no confirmation supplied by the UI layer.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// An answer the UI already collected, e.g. from a modal dialog or a `--yes` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preconfirmed(pub bool);

impl Confirm for Preconfirmed {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
