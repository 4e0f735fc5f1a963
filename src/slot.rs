use core::any::{type_name, TypeId};
use std::fmt;

/// How a constructor slot receives its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BindingKind {
    /// The slot takes ownership of the value.
    Owned,
    /// The slot borrows the value for the lifetime of the subject.
    Ref,
    /// The slot borrows the value exclusively.
    RefMut,
    /// The slot holds shared ownership through an [`Arc`](std::sync::Arc).
    Shared,
}

/// Canonical identity of a constructor parameter.
///
/// Two identities are equal iff they name the same underlying type in the
/// same binding category: `&T` and `T` are distinct, `&T` and `&mut T` are
/// distinct, while mutability of an owned binding does not exist at the type
/// level and therefore never enters the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    type_id: TypeId,
    binding: BindingKind,
}

impl SlotId {
    /// Identity of the underlying type `T` in the given binding category.
    pub fn of<T: ?Sized + 'static>(binding: BindingKind) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            binding,
        }
    }

    pub fn binding(&self) -> BindingKind {
        self.binding
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// One recovered constructor parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotInfo {
    id: SlotId,
    type_name: &'static str,
    mock: bool,
}

impl SlotInfo {
    pub(crate) fn plain<T: ?Sized + 'static>(binding: BindingKind) -> Self {
        Self {
            id: SlotId::of::<T>(binding),
            type_name: type_name::<T>(),
            mock: false,
        }
    }

    pub(crate) fn mock<M: ?Sized + 'static>(binding: BindingKind) -> Self {
        Self {
            id: SlotId::of::<M>(binding),
            type_name: type_name::<M>(),
            mock: true,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Name of the underlying type, without the reference part.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this slot was recognized as a mockable interface.
    pub fn is_mock(&self) -> bool {
        self.mock
    }
}

impl fmt::Display for SlotInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id.binding {
            BindingKind::Owned => write!(f, "{}", self.type_name),
            BindingKind::Ref => write!(f, "&{}", self.type_name),
            BindingKind::RefMut => write!(f, "&mut {}", self.type_name),
            BindingKind::Shared => write!(f, "Arc<{}>", self.type_name),
        }
    }
}

/// The recovered shape of a subject constructor: every parameter, in
/// declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorShape {
    slots: Vec<SlotInfo>,
}

impl ConstructorShape {
    pub(crate) fn new(slots: Vec<SlotInfo>) -> Self {
        Self { slots }
    }

    /// Number of constructor parameters.
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[SlotInfo] {
        &self.slots
    }

    pub fn ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().map(|slot| slot.id)
    }
}

impl fmt::Display for ConstructorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, slot) in self.slots.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{slot}")?;
        }
        write!(f, ")")
    }
}

#[test]
fn identity_is_structural() {
    assert_eq!(
        SlotId::of::<i32>(BindingKind::Owned),
        SlotId::of::<i32>(BindingKind::Owned)
    );
    assert_ne!(
        SlotId::of::<i32>(BindingKind::Owned),
        SlotId::of::<i32>(BindingKind::Ref)
    );
    assert_ne!(
        SlotId::of::<i32>(BindingKind::Owned),
        SlotId::of::<char>(BindingKind::Owned)
    );
}

#[test]
fn shape_displays_like_a_signature() {
    let shape = ConstructorShape::new(vec![
        SlotInfo::plain::<i32>(BindingKind::Owned),
        SlotInfo::plain::<i32>(BindingKind::RefMut),
    ]);
    assert_eq!("(i32, &mut i32)", shape.to_string());
}
