//! Facades that can swap themselves for a test double.

/// A facade exposing a fake activation entry point.
///
/// [`Scenario::fake`](crate::Scenario::fake) calls [`Fake::fake`] exactly
/// once, immediately, before any step is registered or evaluated.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use gwt_scenario::{Fake, Scenario};
///
/// static FAKED: AtomicBool = AtomicBool::new(false);
///
/// struct Mailer;
///
/// impl Fake for Mailer {
///     fn fake() {
///         FAKED.store(true, Ordering::SeqCst);
///     }
/// }
///
/// let _scenario = Scenario::new().fake::<Mailer>();
/// assert!(FAKED.load(Ordering::SeqCst));
/// ```
pub trait Fake {
    /// Replaces the facade's implementation with a fake.
    fn fake();
}
