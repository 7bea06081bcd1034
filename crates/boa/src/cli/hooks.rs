//! Lifecycle hooks run around a command's `run` function.
//!
//! # Hook Points
//!
//! - Persistent pre-run: the nearest one found walking from the target
//!   command to the root runs first.
//! - Pre-run, run, post-run: the target command's own hooks.
//! - Persistent post-run: the nearest one, run last.
//!
//! Every point has a plain variant (`Fn(&Invocation)`) and an `_e` variant
//! returning `anyhow::Result<()>`. When both are registered the `_e` variant
//! runs. An error stops the sequence.

use std::rc::Rc;

use super::context::Invocation;

/// Plain hook: cannot fail.
pub type HookFn = Rc<dyn Fn(&Invocation<'_>)>;

/// Fallible hook; an `Err` aborts execution and is reported as the command error.
pub type HookResultFn = Rc<dyn Fn(&Invocation<'_>) -> anyhow::Result<()>>;

#[derive(Clone)]
pub(crate) enum Hook {
    Plain(HookFn),
    Fallible(HookResultFn),
}

impl Hook {
    pub(crate) fn call(&self, inv: &Invocation<'_>) -> anyhow::Result<()> {
        match self {
            Hook::Plain(f) => {
                f(inv);
                Ok(())
            }
            Hook::Fallible(f) => f(inv),
        }
    }
}

/// A hook slot. The fallible variant, once set, is never replaced by a plain one.
#[derive(Clone, Default)]
pub(crate) struct Slot(Option<Hook>);

impl Slot {
    pub(crate) fn set_plain(&mut self, f: HookFn) {
        if !matches!(self.0, Some(Hook::Fallible(_))) {
            self.0 = Some(Hook::Plain(f));
        }
    }

    pub(crate) fn set_fallible(&mut self, f: HookResultFn) {
        self.0 = Some(Hook::Fallible(f));
    }

    pub(crate) fn get(&self) -> Option<&Hook> {
        self.0.as_ref()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

/// The hooks registered on one command.
#[derive(Clone, Default)]
pub(crate) struct Hooks {
    pub persistent_pre_run: Slot,
    pub pre_run: Slot,
    pub run: Slot,
    pub post_run: Slot,
    pub persistent_post_run: Slot,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("persistent_pre_run", &self.persistent_pre_run.is_set())
            .field("pre_run", &self.pre_run.is_set())
            .field("run", &self.run.is_set())
            .field("post_run", &self.post_run.is_set())
            .field("persistent_post_run", &self.persistent_post_run.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallible_not_replaced_by_plain() {
        let mut slot = Slot::default();
        slot.set_fallible(Rc::new(|_| Ok(())));
        slot.set_plain(Rc::new(|_| {}));
        assert!(matches!(slot.get(), Some(Hook::Fallible(_))));
    }

    #[test]
    fn test_plain_replaced_by_fallible() {
        let mut slot = Slot::default();
        slot.set_plain(Rc::new(|_| {}));
        slot.set_fallible(Rc::new(|_| Ok(())));
        assert!(matches!(slot.get(), Some(Hook::Fallible(_))));
    }

    #[test]
    fn test_debug_lists_set_hooks() {
        let mut hooks = Hooks::default();
        hooks.run.set_plain(Rc::new(|_| {}));
        let debug = format!("{hooks:?}");
        assert!(debug.contains("run: true"));
        assert!(debug.contains("pre_run: false"));
    }
}
