use tokio::sync::watch;

/// Scope guard for a store's `loading` flag.
///
/// `begin` applies the start transition immediately; dropping the guard
/// applies the finish transition, whether the operation returned, failed,
/// or its future was dropped mid-flight.
pub(crate) struct LoadingGuard<'a, S> {
    state: &'a watch::Sender<S>,
    finish: fn(&mut S),
}

impl<'a, S> LoadingGuard<'a, S> {
    pub(crate) fn begin(state: &'a watch::Sender<S>, start: fn(&mut S), finish: fn(&mut S)) -> Self {
        state.send_modify(start);
        Self { state, finish }
    }
}

impl<S> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.state.send_modify(self.finish);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Flag {
        loading: bool,
    }

    #[test]
    fn clears_on_drop() {
        let (tx, rx) = watch::channel(Flag::default());
        {
            let _guard = LoadingGuard::begin(&tx, |s| s.loading = true, |s| s.loading = false);
            assert!(rx.borrow().loading);
        }
        assert!(!rx.borrow().loading);
    }
}
