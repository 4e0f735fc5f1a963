use core::any::Any;
use once_cell::unsync::OnceCell;

/// Append-only storage for default-constructed slot values.
///
/// Values are never removed until the pool is dropped, so a reference handed
/// to a subject stays valid for as long as the fixture lives.
#[derive(Default)]
pub(crate) struct ValuePool {
    root: OnceCell<Node>,
}

impl ValuePool {
    pub fn add_default<T: Default + Any>(&self) -> &T {
        let node = self.push(Node::new(T::default()));
        node.value.downcast_ref::<T>().unwrap()
    }

    fn push(&self, mut new_node: Node) -> &Node {
        let mut cell = &self.root;
        loop {
            match cell.try_insert(new_node) {
                Ok(inserted) => return inserted,
                Err((occupied, rejected)) => {
                    new_node = rejected;
                    cell = &occupied.next;
                }
            }
        }
    }
}

// Dropping node by node keeps long pools from overflowing the stack.
impl Drop for ValuePool {
    fn drop(&mut self) {
        let mut cell = core::mem::take(&mut self.root);
        while let Some(node) = cell.take() {
            drop(node.value);
            cell = *node.next;
        }
    }
}

struct Node {
    value: Box<dyn Any>,
    next: Box<OnceCell<Node>>,
}

impl Node {
    fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            next: Box::default(),
        }
    }
}

#[test]
fn hands_out_stable_references() {
    let pool = ValuePool::default();
    let first = pool.add_default::<i32>();
    let second = pool.add_default::<String>();
    let third = pool.add_default::<i32>();

    assert_eq!(&0, first);
    assert_eq!("", second);
    assert!(!std::ptr::eq(first, third));
}
