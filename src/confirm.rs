//! Destructive Action Confirmation
//!
//! Two-phase request -> confirm state shared by every delete in the app.

/// A pending destructive action awaiting user confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction<T> {
    pub target: T,
    pub description: String,
}

/// Confirmation state: nothing happens until `confirm` is called on a
/// previously requested target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmAction<T> {
    pending: Option<PendingAction<T>>,
}

impl<T> Default for ConfirmAction<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T: Clone> ConfirmAction<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for confirmation. A newer request replaces an older one.
    pub fn request(&mut self, target: T, description: impl Into<String>) {
        self.pending = Some(PendingAction {
            target,
            description: description.into(),
        });
    }

    /// Release the pending target for execution
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.target)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingAction<T>> {
        self.pending.as_ref()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_without_request_yields_nothing() {
        let mut action = ConfirmAction::<u32>::new();
        assert_eq!(action.confirm(), None);
    }

    #[test]
    fn test_request_then_confirm() {
        let mut action = ConfirmAction::new();
        action.request(7u32, "Apagar ingrediente?");
        assert!(action.is_pending());
        assert_eq!(action.pending().unwrap().description, "Apagar ingrediente?");
        assert_eq!(action.confirm(), Some(7));
        // Consumed
        assert_eq!(action.confirm(), None);
    }

    #[test]
    fn test_cancel_discards_request() {
        let mut action = ConfirmAction::new();
        action.request("x".to_string(), "Apagar?");
        action.cancel();
        assert!(!action.is_pending());
        assert_eq!(action.confirm(), None);
    }

    #[test]
    fn test_newer_request_wins() {
        let mut action = ConfirmAction::new();
        action.request(1u32, "a");
        action.request(2u32, "b");
        assert_eq!(action.confirm(), Some(2));
    }
}
