use log::{debug, warn};

use crate::error::BackendError;

/// How a backend call site settles its round trip once local state has
/// already been applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemoteSync {
    /// Hand failures back to the caller. Local state is not rolled back.
    Propagate,
    /// Log and drop failures.
    Detached,
}

impl RemoteSync {
    /// `Ok(Some(value))` on success. On failure, `Propagate` returns the
    /// error and `Detached` returns `Ok(None)`.
    pub fn settle<T>(
        self,
        command: &'static str,
        result: Result<T, BackendError>,
    ) -> Result<Option<T>, BackendError> {
        match (self, result) {
            (_, Ok(value)) => Ok(Some(value)),
            (RemoteSync::Propagate, Err(e)) => {
                warn!("{command} failed: {e}");
                Err(e)
            }
            (RemoteSync::Detached, Err(e)) => {
                debug!("{command} failed, ignoring: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_applies_policy_only_to_failures() {
        let err = || BackendError::command("set_volume", "boom");

        assert_eq!(RemoteSync::Propagate.settle("x", Ok(3)), Ok(Some(3)));
        assert_eq!(RemoteSync::Detached.settle("x", Ok(3)), Ok(Some(3)));
        assert_eq!(RemoteSync::Propagate.settle::<()>("x", Err(err())), Err(err()));
        assert_eq!(RemoteSync::Detached.settle::<()>("x", Err(err())), Ok(None));
    }
}
