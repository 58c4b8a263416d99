use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Mock animated target for testing purposes: records the last value applied and how many times
/// a value was applied.
#[derive(Clone, Debug, Default)]
pub struct MockTarget<T> {
    value: Arc<RwLock<T>>,
    calls: Arc<AtomicUsize>,
}

impl<T: Send + Sync + 'static> MockTarget<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns a callback applying values to this target, to be given to an animation.
    pub fn setter(&self) -> impl Fn(T) + Send + Sync + 'static {
        let value = self.value.clone();
        let calls = self.calls.clone();
        move |new_value: T| {
            *value.write() = new_value;
            calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Returns how many values were applied so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T: Clone> MockTarget<T> {
    /// Returns the last applied value (or the initial one).
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Display> Display for MockTarget<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MockTarget [value={}, calls={}]",
            self.value.read(),
            self.calls.load(Ordering::SeqCst)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_target() {
        let target = MockTarget::new(1.5f32);
        assert_eq!(target.get(), 1.5);
        assert_eq!(target.calls(), 0);

        let setter = target.setter();
        setter(2.0);
        setter(3.0);
        assert_eq!(target.get(), 3.0);
        assert_eq!(target.calls(), 2);
        assert_eq!(target.clone().calls(), 2);
        assert_eq!(target.to_string(), "MockTarget [value=3, calls=2]");
    }
}
