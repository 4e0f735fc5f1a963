use std::sync::Arc;

/// Connects an interface (a `dyn Trait` type) to the mock type impersonating
/// it.
///
/// The registry uses this link to synthesize a mock the first time a
/// constructor slot of the interface type is encountered. Mocks generated by
/// [`mockall::automock`](crate::mockall::automock) satisfy the `Default`
/// bound out of the box; wire them up with [`mockable!`](crate::mockable).
pub trait Mockable: 'static {
    /// The concrete mock object standing in for the interface.
    type Imposter: Default + 'static;

    /// Interface name used in diagnostics.
    const NAME: &'static str;

    /// View the imposter through the interface.
    fn from_imposter(imposter: &Self::Imposter) -> &Self;

    /// Share ownership of the imposter under the interface type.
    fn share(imposter: Arc<Self::Imposter>) -> Arc<Self>;
}

/// Wires one or more mocked traits into the registry.
///
/// The mock type on the right is whatever the mocking backend generated for
/// the trait on the left, e.g. `MockIo` for an `#[automock] trait Io`.
///
/// ```
/// use sutkit::mockable;
/// use sutkit::mockall::automock;
///
/// #[automock]
/// trait Io {
///     fn read(&self) -> u8;
/// }
///
/// mockable!(dyn Io => MockIo);
/// ```
#[macro_export]
macro_rules! mockable {
    ($(dyn $interface:path => $imposter:ty),+ $(,)?) => {
        $(
            impl $crate::Mockable for dyn $interface {
                type Imposter = $imposter;

                const NAME: &'static str = stringify!($interface);

                fn from_imposter(imposter: &Self::Imposter) -> &Self {
                    imposter
                }

                fn share(
                    imposter: ::std::sync::Arc<Self::Imposter>,
                ) -> ::std::sync::Arc<Self> {
                    imposter
                }
            }
        )+
    };
}
