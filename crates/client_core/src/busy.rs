use tokio::sync::watch;

/// Snapshot of the in-flight request flags, published while the controller is
/// exclusively borrowed by a running operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    pub loading: bool,
    pub adding_user: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum BusyKind {
    Loading,
    AddingUser,
}

impl Activity {
    fn set(&mut self, kind: BusyKind, value: bool) {
        match kind {
            BusyKind::Loading => self.loading = value,
            BusyKind::AddingUser => self.adding_user = value,
        }
    }
}

/// Holds a busy flag raised for as long as the guard lives. Dropping the guard
/// lowers the flag, whether the request finished, failed, or its future was
/// dropped mid-flight.
pub(crate) struct BusyFlag<'a> {
    flag: &'a mut bool,
    kind: BusyKind,
    activity: &'a watch::Sender<Activity>,
}

impl<'a> BusyFlag<'a> {
    pub(crate) fn raise(
        flag: &'a mut bool,
        kind: BusyKind,
        activity: &'a watch::Sender<Activity>,
    ) -> Self {
        *flag = true;
        activity.send_modify(|a| a.set(kind, true));
        Self {
            flag,
            kind,
            activity,
        }
    }

    #[cfg(test)]
    fn is_raised(&self) -> bool {
        *self.flag
    }
}

impl Drop for BusyFlag<'_> {
    fn drop(&mut self) {
        *self.flag = false;
        let kind = self.kind;
        self.activity.send_modify(|a| a.set(kind, false));
    }
}
