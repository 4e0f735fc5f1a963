//! Slot resolution: how each constructor parameter obtains its value.
//!
//! Slots are walked in declaration order. An interface slot is satisfied
//! from the mock registry and never consumes an explicit argument. A plain
//! slot consumes the next explicit argument when one remains (its type must
//! match the slot exactly), and falls back to a default-constructed value
//! once the arguments are exhausted.
//!
//! Each strategy is one implementation of [`Resolve`], discriminated by a
//! marker type. The marker is inferred from the slot type and the shape of
//! the remaining argument list; callers never name it.

use std::sync::Arc;

use crate::slot::{BindingKind, SlotInfo};
use crate::{Fixture, Mockable};

/// Resolves one constructor slot of type `Self`.
pub trait Resolve<'fx, Args, Marker>: Sized {
    /// Explicit arguments left over after this slot.
    type Rest;

    /// First pass: synthesize whatever the fixture must own before the
    /// subject can borrow it, and record the slot in the constructor shape.
    fn ensure(fx: &mut Fixture);

    /// Second pass: produce the value bound to this slot.
    fn resolve(fx: &'fx Fixture, args: Args) -> (Self, Self::Rest);
}

/// Marker: interface slot borrowed from the mock registry.
pub struct FromRegistry;

/// Marker: interface slot sharing ownership of a registry mock.
pub struct SharedFromRegistry;

/// Marker: plain slot consuming the next explicit argument by value.
pub struct FromArgs;

/// Marker: reference slot consuming the next explicit argument.
pub struct RefFromArgs;

/// Marker: exclusive-reference slot consuming the next explicit argument.
pub struct MutFromArgs;

/// Marker: plain slot defaulted after the explicit arguments ran out.
pub struct Defaulted;

/// Marker: reference slot defaulted into fixture-owned storage.
pub struct DefaultedRef;

impl<'fx, M, Args> Resolve<'fx, Args, FromRegistry> for &'fx M
where
    M: Mockable + ?Sized,
{
    type Rest = Args;

    fn ensure(fx: &mut Fixture) {
        fx.record_slot(SlotInfo::mock::<M>(BindingKind::Ref));
        fx.registry_mut().ensure::<M>();
    }

    fn resolve(fx: &'fx Fixture, args: Args) -> (Self, Args) {
        (fx.registry().borrow_mock::<M>(), args)
    }
}

impl<'fx, M, Args> Resolve<'fx, Args, SharedFromRegistry> for Arc<M>
where
    M: Mockable + ?Sized,
{
    type Rest = Args;

    fn ensure(fx: &mut Fixture) {
        fx.record_slot(SlotInfo::mock::<M>(BindingKind::Shared));
        fx.registry_mut().ensure::<M>();
    }

    fn resolve(fx: &'fx Fixture, args: Args) -> (Self, Args) {
        (fx.registry().share_mock::<M>(), args)
    }
}

impl<'fx, T, Rest> Resolve<'fx, (T, Rest), FromArgs> for T
where
    T: Default + 'static,
{
    type Rest = Rest;

    fn ensure(fx: &mut Fixture) {
        fx.record_slot(SlotInfo::plain::<T>(BindingKind::Owned));
    }

    fn resolve(_fx: &'fx Fixture, args: (T, Rest)) -> (T, Rest) {
        args
    }
}

impl<'fx, T, Rest> Resolve<'fx, (&'fx T, Rest), RefFromArgs> for &'fx T
where
    T: ?Sized + 'static,
{
    type Rest = Rest;

    fn ensure(fx: &mut Fixture) {
        fx.record_slot(SlotInfo::plain::<T>(BindingKind::Ref));
    }

    fn resolve(_fx: &'fx Fixture, args: (&'fx T, Rest)) -> (&'fx T, Rest) {
        args
    }
}

impl<'fx, T, Rest> Resolve<'fx, (&'fx mut T, Rest), MutFromArgs> for &'fx mut T
where
    T: ?Sized + 'static,
{
    type Rest = Rest;

    fn ensure(fx: &mut Fixture) {
        fx.record_slot(SlotInfo::plain::<T>(BindingKind::RefMut));
    }

    fn resolve(_fx: &'fx Fixture, args: (&'fx mut T, Rest)) -> (&'fx mut T, Rest) {
        args
    }
}

impl<'fx, T> Resolve<'fx, (), Defaulted> for T
where
    T: Default + 'static,
{
    type Rest = ();

    fn ensure(fx: &mut Fixture) {
        fx.record_slot(SlotInfo::plain::<T>(BindingKind::Owned));
    }

    fn resolve(_fx: &'fx Fixture, _args: ()) -> (T, ()) {
        (T::default(), ())
    }
}

impl<'fx, T> Resolve<'fx, (), DefaultedRef> for &'fx T
where
    T: Default + 'static,
{
    type Rest = ();

    fn ensure(fx: &mut Fixture) {
        fx.record_slot(SlotInfo::plain::<T>(BindingKind::Ref));
    }

    fn resolve(fx: &'fx Fixture, _args: ()) -> (&'fx T, ()) {
        (fx.pool().add_default::<T>(), ())
    }
}

/// Terminal bound for the explicit-argument walk: every supplied argument
/// must have been consumed by some slot.
pub trait ArgsExhausted {}

impl ArgsExhausted for () {}

/// Converts a flat argument tuple into the nested list the binder walks.
pub trait IntoArgList {
    type List;

    fn into_arg_list(self) -> Self::List;
}

macro_rules! cons {
    () => { () };
    ($head:ident $(, $tail:ident)*) => { ($head, cons!($($tail),*)) };
}

pub(crate) use cons;

macro_rules! impl_into_arg_list {
    ($($arg:ident),*) => {
        impl<$($arg),*> IntoArgList for ($($arg,)*) {
            type List = cons!($($arg),*);

            #[allow(non_snake_case, clippy::unused_unit)]
            fn into_arg_list(self) -> Self::List {
                let ($($arg,)*) = self;
                cons!($($arg),*)
            }
        }
    };
}

impl_into_arg_list!();
impl_into_arg_list!(A0);
impl_into_arg_list!(A0, A1);
impl_into_arg_list!(A0, A1, A2);
impl_into_arg_list!(A0, A1, A2, A3);
impl_into_arg_list!(A0, A1, A2, A3, A4);
impl_into_arg_list!(A0, A1, A2, A3, A4, A5);
impl_into_arg_list!(A0, A1, A2, A3, A4, A5, A6);
impl_into_arg_list!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_into_arg_list!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_into_arg_list!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
