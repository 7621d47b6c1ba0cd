//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Delay` that dispatches an action after a duration
///
/// # Example
///
/// ```rust
/// use tasklist_core::{delay, effect::Effect};
/// use std::time::Duration;
///
/// #[derive(Clone, Debug)]
/// enum Action {
///     Sweep,
/// }
///
/// let effect: Effect<Action> = delay! {
///     duration: Duration::from_secs(60),
///     action: Action::Sweep
/// };
/// assert!(matches!(effect, Effect::Delay { .. }));
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
