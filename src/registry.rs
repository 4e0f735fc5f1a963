use core::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::HarnessError;
use crate::slot::ConstructorShape;
use crate::Mockable;

/// Owns every mock synthesized for one fixture, keyed by interface identity.
///
/// A mock is created lazily the first time its interface is requested, and
/// the same instance is handed out for every later request within the
/// fixture. Creation order is stable: entries remember the sequence in which
/// they were synthesized.
#[derive(Default)]
pub(crate) struct MockRegistry {
    entries: BTreeMap<TypeId, MockEntry>,
    next_seq: usize,
}

struct MockEntry {
    name: &'static str,
    seq: usize,
    touched: bool,
    imposter: Box<dyn Any>,
}

impl MockRegistry {
    /// Synthesize the mock for `M` unless it already exists, and mark it as
    /// part of the construction in progress.
    pub fn ensure<M: Mockable + ?Sized>(&mut self) {
        let next_seq = &mut self.next_seq;
        let entry = self.entries.entry(TypeId::of::<M>()).or_insert_with(|| {
            let seq = *next_seq;
            *next_seq += 1;
            MockEntry {
                name: M::NAME,
                seq,
                touched: false,
                imposter: Box::new(Arc::new(M::Imposter::default())),
            }
        });
        entry.touched = true;
    }

    /// Exclusive access to the imposter behind `M`, for expectation setup.
    ///
    /// Panics if a previously constructed subject still shares the mock.
    pub fn imposter_mut<M: Mockable + ?Sized>(&mut self) -> &mut M::Imposter {
        self.ensure::<M>();
        let entry = match self.entries.get_mut(&TypeId::of::<M>()) {
            Some(entry) => entry,
            None => panic!("{}", HarnessError::MissingMock { name: M::NAME }),
        };
        let shared = entry
            .imposter
            .downcast_mut::<Arc<M::Imposter>>()
            .unwrap_or_else(|| panic!("{}", HarnessError::Downcast { name: M::NAME }));
        Arc::get_mut(shared)
            .unwrap_or_else(|| panic!("{}", HarnessError::StillShared { name: M::NAME }))
    }

    pub fn borrow_mock<M: Mockable + ?Sized>(&self) -> &M {
        M::from_imposter(self.shared::<M>())
    }

    pub fn share_mock<M: Mockable + ?Sized>(&self) -> Arc<M> {
        M::share(Arc::clone(self.shared::<M>()))
    }

    fn shared<M: Mockable + ?Sized>(&self) -> &Arc<M::Imposter> {
        let entry = self
            .entries
            .get(&TypeId::of::<M>())
            .unwrap_or_else(|| panic!("{}", HarnessError::MissingMock { name: M::NAME }));
        entry
            .imposter
            .downcast_ref::<Arc<M::Imposter>>()
            .unwrap_or_else(|| panic!("{}", HarnessError::Downcast { name: M::NAME }))
    }

    pub fn begin_make(&mut self) {
        for entry in self.entries.values_mut() {
            entry.touched = false;
        }
    }

    /// The mocks that took part in the construction in progress, in creation
    /// order.
    pub fn snapshot(&self) -> Vec<MockInfo> {
        let mut created: Vec<MockInfo> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.touched)
            .map(|(type_id, entry)| MockInfo {
                type_id: *type_id,
                name: entry.name,
                seq: entry.seq,
            })
            .collect();
        created.sort_by_key(|info| info.seq);
        created
    }
}

/// The mocks synthesized while constructing one subject, in creation order,
/// together with the recovered constructor shape.
pub struct Mocks {
    pub(crate) created: Vec<MockInfo>,
    pub(crate) shape: ConstructorShape,
}

impl Mocks {
    pub fn len(&self) -> usize {
        self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }

    /// Whether a mock was synthesized for the given interface.
    pub fn contains<M: Mockable + ?Sized>(&self) -> bool {
        self.created
            .iter()
            .any(|info| info.type_id == TypeId::of::<M>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MockInfo> {
        self.created.iter()
    }

    /// The constructor shape recovered while assembling the subject.
    pub fn shape(&self) -> &ConstructorShape {
        &self.shape
    }
}

/// One synthesized mock.
#[derive(Clone, Debug)]
pub struct MockInfo {
    type_id: TypeId,
    name: &'static str,
    seq: usize,
}

impl MockInfo {
    /// Interface name as registered by [`mockable!`](crate::mockable).
    pub fn name(&self) -> &'static str {
        self.name
    }
}
