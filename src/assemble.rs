//! Constructor discovery: arity selection and the parameter walk.
//!
//! [`Assemble`] is implemented for constructor functions of every arity up
//! to [`MAX_ARITY`]. Trait selection picks the implementation matching the
//! function's parameter count, which is how the harness learns the arity
//! without any annotation on the subject. [`ResolveChain`] then walks the
//! parameter list in declaration order, threading the explicit arguments
//! through each slot.
//!
//! Construction is two-pass. The ensure pass runs with exclusive access to
//! the fixture: it records the constructor shape and synthesizes registry
//! mocks and defaulted values. The assemble pass runs against a shared
//! borrow, so everything the subject receives may keep borrowing the fixture
//! for as long as the subject lives.

use crate::bind::{cons, ArgsExhausted, Resolve};
use crate::Fixture;

/// Highest constructor arity the harness recognizes. Constructors with more
/// parameters fail to compile.
pub const MAX_ARITY: usize = 10;

/// A constructor whose parameters can all be resolved by the fixture.
pub trait Assemble<'fx, Args, Marker> {
    /// What the constructor produces.
    type Subject;

    /// Walk the parameter list, recording the constructor shape and
    /// preparing fixture-owned state.
    fn ensure(fx: &mut Fixture);

    /// Resolve every parameter and invoke the constructor.
    fn assemble(self, fx: &'fx Fixture, args: Args) -> Self::Subject;
}

/// Walks a nested list of parameter types, threading the explicit arguments
/// through each step.
pub trait ResolveChain<'fx, Args, Marker>: Sized {
    type Rest;

    fn ensure(fx: &mut Fixture);

    fn resolve_chain(fx: &'fx Fixture, args: Args) -> (Self, Self::Rest);
}

impl<'fx, Args> ResolveChain<'fx, Args, ()> for () {
    type Rest = Args;

    fn ensure(_fx: &mut Fixture) {}

    fn resolve_chain(_fx: &'fx Fixture, args: Args) -> ((), Args) {
        ((), args)
    }
}

impl<'fx, Head, Tail, Args, HeadMarker, TailMarker>
    ResolveChain<'fx, Args, (HeadMarker, TailMarker)> for (Head, Tail)
where
    Head: Resolve<'fx, Args, HeadMarker>,
    Tail: ResolveChain<'fx, Head::Rest, TailMarker>,
{
    type Rest = Tail::Rest;

    fn ensure(fx: &mut Fixture) {
        Head::ensure(fx);
        Tail::ensure(fx);
    }

    fn resolve_chain(fx: &'fx Fixture, args: Args) -> (Self, Self::Rest) {
        let (head, rest) = Head::resolve(fx, args);
        let (tail, rest) = Tail::resolve_chain(fx, rest);
        ((head, tail), rest)
    }
}

macro_rules! impl_assemble {
    ($($param:ident $marker:ident),*) => {
        impl<'fx, Func, Subject, Args, $($param, $marker),*>
            Assemble<'fx, Args, (cons!($($param),*), cons!($($marker),*))> for Func
        where
            Func: FnOnce($($param),*) -> Subject,
            cons!($($param),*): ResolveChain<'fx, Args, cons!($($marker),*)>,
            <cons!($($param),*) as ResolveChain<'fx, Args, cons!($($marker),*)>>::Rest:
                ArgsExhausted,
        {
            type Subject = Subject;

            fn ensure(fx: &mut Fixture) {
                <cons!($($param),*) as ResolveChain<'fx, Args, cons!($($marker),*)>>::ensure(fx);
            }

            #[allow(non_snake_case)]
            fn assemble(self, fx: &'fx Fixture, args: Args) -> Subject {
                let (cons!($($param),*), _rest) =
                    <cons!($($param),*) as ResolveChain<'fx, Args, cons!($($marker),*)>>::resolve_chain(fx, args);
                self($($param),*)
            }
        }
    };
}

impl_assemble!();
impl_assemble!(P0 M0);
impl_assemble!(P0 M0, P1 M1);
impl_assemble!(P0 M0, P1 M1, P2 M2);
impl_assemble!(P0 M0, P1 M1, P2 M2, P3 M3);
impl_assemble!(P0 M0, P1 M1, P2 M2, P3 M3, P4 M4);
impl_assemble!(P0 M0, P1 M1, P2 M2, P3 M3, P4 M4, P5 M5);
impl_assemble!(P0 M0, P1 M1, P2 M2, P3 M3, P4 M4, P5 M5, P6 M6);
impl_assemble!(P0 M0, P1 M1, P2 M2, P3 M3, P4 M4, P5 M5, P6 M6, P7 M7);
impl_assemble!(P0 M0, P1 M1, P2 M2, P3 M3, P4 M4, P5 M5, P6 M6, P7 M7, P8 M8);
impl_assemble!(P0 M0, P1 M1, P2 M2, P3 M3, P4 M4, P5 M5, P6 M6, P7 M7, P8 M8, P9 M9);
