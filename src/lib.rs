//!
//! `sutkit` is an auto-mocking test harness: point it at a constructor and it
//! figures out how many parameters the constructor has, what each parameter's
//! type is, and which of them are polymorphic dependencies. Interface slots
//! are filled with synthesized mocks, plain-value slots take explicit
//! arguments from the test or fall back to defaults, and the assembled
//! subject comes back together with an inventory of the mocks it received.
//!
//! Mock objects themselves come from [`mockall`]: annotate the dependency
//! trait with `#[automock]` and wire the generated mock type into the
//! harness with [`mockable!`]:
//!
//! ```rust
//! use sutkit::{mockable, Fixture};
//! use sutkit::mockall::automock;
//! use sutkit::mockall::predicate::eq;
//!
//! #[automock]
//! trait Warehouse {
//!     fn reserve(&self, quantity: u32) -> bool;
//! }
//!
//! mockable!(dyn Warehouse => MockWarehouse);
//!
//! struct Checkout<'a> {
//!     order_id: u64,
//!     warehouse: &'a dyn Warehouse,
//! }
//!
//! impl<'a> Checkout<'a> {
//!     fn new(order_id: u64, warehouse: &'a dyn Warehouse) -> Self {
//!         Self { order_id, warehouse }
//!     }
//!
//!     fn submit(&self) -> bool {
//!         self.warehouse.reserve(2)
//!     }
//! }
//!
//! let mut fx = Fixture::new();
//! fx.with_mock::<dyn Warehouse, _>(|warehouse| {
//!     warehouse
//!         .expect_reserve()
//!         .with(eq(2))
//!         .times(1)
//!         .return_const(true);
//! });
//!
//! let (checkout, mocks) = fx.make_with(Checkout::new, (7001,));
//! assert_eq!(1, mocks.len());
//! assert!(checkout.submit());
//! ```
//!
//! # How slots resolve
//!
//! Constructor parameters are walked in declaration order:
//!
//! 1. A `&dyn Trait` or `Arc<dyn Trait>` slot whose trait was registered
//!    with [`mockable!`] binds to the fixture's mock for that trait,
//!    creating it on first encounter. Interface slots never consume explicit
//!    arguments, and every slot of the same trait shares one mock instance.
//! 2. Any other slot consumes the next explicit argument, if one remains.
//!    The argument's type must match the slot exactly; a mismatch, or
//!    arguments left over at the end, fail to compile. References bind the
//!    supplied object itself, not a copy.
//! 3. Once the arguments are exhausted, owned slots default-construct their
//!    value and `&T` slots borrow a defaulted value owned by the fixture.
//!    `&mut T` slots have no default and require an explicit argument.
//!
//! Constructors with up to [`MAX_ARITY`] parameters are recognized.
//!
//! # Expectations and teardown
//!
//! Expectations are registered through [`Fixture::with_mock`] while the
//! fixture still has exclusive access to the mock, i.e. before the subject
//! is made (or between subjects). Verification is automatic: every mockall
//! mock checks its expectations when dropped, so unmet expectations fail the
//! test when the fixture (or the last `Arc` handle) goes out of scope.
//!
//! The subject borrows the fixture, which is what makes the teardown order a
//! compiler guarantee: the subject cannot outlive the mocks it references.
//! Subjects that hold their dependencies as `Arc<dyn Trait>` do not borrow
//! and may outlive the fixture; their mocks are verified when the last
//! handle drops.

#![forbid(unsafe_code)]

mod assemble;
mod bind;
mod error;
mod mockable;
mod pool;
mod registry;
mod slot;

pub use assemble::{Assemble, ResolveChain, MAX_ARITY};
pub use bind::{
    ArgsExhausted, Defaulted, DefaultedRef, FromArgs, FromRegistry, IntoArgList, MutFromArgs,
    RefFromArgs, Resolve, SharedFromRegistry,
};
pub use mockable::Mockable;
pub use registry::{MockInfo, Mocks};
pub use slot::{BindingKind, ConstructorShape, SlotId, SlotInfo};

pub use mockall;

use pool::ValuePool;
use registry::MockRegistry;

/// The per-test owner of the mock registry and everything a subject borrows.
///
/// A fixture assembles subjects with [`make`](Fixture::make) and
/// [`make_with`](Fixture::make_with). Dropping the fixture drops the mocks,
/// which triggers expectation verification.
#[derive(Default)]
pub struct Fixture {
    registry: MockRegistry,
    pool: ValuePool,
    shape: Vec<SlotInfo>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set expectations on the mock for interface `M`, synthesizing it first
    /// if needed. The same instance is later bound to every `M`-typed
    /// constructor slot.
    ///
    /// Panics if a previously made subject still shares the mock; drop the
    /// subject before reconfiguring.
    pub fn with_mock<M, Setup>(&mut self, setup: Setup) -> &mut Self
    where
        M: Mockable + ?Sized,
        Setup: FnOnce(&mut M::Imposter),
    {
        setup(self.registry.imposter_mut::<M>());
        self
    }

    /// Construct the subject with every slot auto-filled: mocks for
    /// interface slots, defaults for the rest.
    pub fn make<'fx, F, Marker>(&'fx mut self, constructor: F) -> (F::Subject, Mocks)
    where
        F: Assemble<'fx, (), Marker>,
    {
        self.make_with(constructor, ())
    }

    /// Construct the subject, binding the explicit arguments to the
    /// plain-value slots in declaration order. Interface slots are always
    /// satisfied from the mock registry.
    pub fn make_with<'fx, F, Args, Marker>(
        &'fx mut self,
        constructor: F,
        args: Args,
    ) -> (F::Subject, Mocks)
    where
        Args: IntoArgList,
        F: Assemble<'fx, Args::List, Marker>,
    {
        self.shape.clear();
        self.pool = ValuePool::default();
        self.registry.begin_make();

        F::ensure(&mut *self);

        let fx: &'fx Fixture = &*self;
        let subject = constructor.assemble(fx, args.into_arg_list());
        let mocks = Mocks {
            created: fx.registry.snapshot(),
            shape: ConstructorShape::new(fx.shape.clone()),
        };
        (subject, mocks)
    }

    pub(crate) fn record_slot(&mut self, slot: SlotInfo) {
        self.shape.push(slot);
    }

    pub(crate) fn registry(&self) -> &MockRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut MockRegistry {
        &mut self.registry
    }

    pub(crate) fn pool(&self) -> &ValuePool {
        &self.pool
    }
}
