use std::sync::Arc;

use sutkit::mockall::automock;
use sutkit::mockall::predicate::eq;
use sutkit::{mockable, BindingKind, Fixture};

#[derive(Clone, Debug, Default, PartialEq)]
struct Frame {
    data: i32,
}

#[automock]
trait Source {
    fn get(&self, key: i32) -> i32;
}

#[automock]
trait Sink {
    fn accept(&self, value: f64);
}

#[automock]
trait Codec {
    fn encode(&self, frame: Frame);
}

#[automock]
trait Gate {
    fn get(&self, key: i32) -> i32;
}

mockable!(
    dyn Source => MockSource,
    dyn Sink => MockSink,
    dyn Codec => MockCodec,
    dyn Gate => MockGate,
);

struct Relay<'a> {
    source: Arc<dyn Source>,
    sink: Arc<dyn Sink>,
    codec: &'a dyn Codec,
    gate: &'a dyn Gate,
}

impl<'a> Relay<'a> {
    fn new(
        source: Arc<dyn Source>,
        sink: Arc<dyn Sink>,
        codec: &'a dyn Codec,
        gate: &'a dyn Gate,
    ) -> Self {
        Self {
            source,
            sink,
            codec,
            gate,
        }
    }

    fn update(&self) {
        let key = self.source.get(42);
        self.sink.accept(77.0);
        self.codec.encode(Frame::default());
        self.gate.get(key);
    }
}

#[test]
fn synthesizes_one_mock_per_distinct_interface() {
    let mut fx = Fixture::new();
    fx.with_mock::<dyn Source, _>(|source| {
        source.expect_get().with(eq(42)).times(1).return_const(123);
    });
    fx.with_mock::<dyn Sink, _>(|sink| {
        sink.expect_accept().with(eq(77.0)).times(1).return_const(());
    });
    fx.with_mock::<dyn Codec, _>(|codec| {
        codec
            .expect_encode()
            .with(eq(Frame::default()))
            .times(1)
            .return_const(());
    });
    fx.with_mock::<dyn Gate, _>(|gate| {
        gate.expect_get().with(eq(123)).times(1).return_const(0);
    });

    let (relay, mocks) = fx.make(Relay::new);
    assert_eq!(4, mocks.len());

    relay.update();
}

#[test]
fn creates_mocks_in_constructor_parameter_order() {
    let mut fx = Fixture::new();
    let (_relay, mocks) = fx.make(Relay::new);

    let names: Vec<_> = mocks.iter().map(|info| info.name()).collect();
    assert_eq!(vec!["Source", "Sink", "Codec", "Gate"], names);

    let kinds: Vec<_> = mocks.shape().ids().map(|id| id.binding()).collect();
    assert_eq!(
        vec![
            BindingKind::Shared,
            BindingKind::Shared,
            BindingKind::Ref,
            BindingKind::Ref,
        ],
        kinds
    );
}

struct Fanout<'a> {
    left: &'a dyn Sink,
    right: &'a dyn Sink,
}

impl<'a> Fanout<'a> {
    fn new(left: &'a dyn Sink, right: &'a dyn Sink) -> Self {
        Self { left, right }
    }

    fn left(&self) -> &dyn Sink {
        self.left
    }

    fn right(&self) -> &dyn Sink {
        self.right
    }
}

#[test]
fn repeated_interface_slots_share_one_mock() {
    let mut fx = Fixture::new();
    fx.with_mock::<dyn Sink, _>(|sink| {
        sink.expect_accept().times(2).return_const(());
    });

    let (fanout, mocks) = fx.make(Fanout::new);
    assert_eq!(1, mocks.len());
    assert!(ptr_eq_data(fanout.left(), fanout.right()));

    fanout.left().accept(1.0);
    fanout.right().accept(2.0);
}

fn ptr_eq_data(a: &dyn Sink, b: &dyn Sink) -> bool {
    std::ptr::eq(a as *const dyn Sink as *const (), b as *const dyn Sink as *const ())
}

struct Beacon {
    source: Arc<dyn Source>,
}

impl Beacon {
    fn new(source: Arc<dyn Source>) -> Self {
        Self { source }
    }

    fn read(&self) -> i32 {
        self.source.get(0)
    }
}

#[test]
fn shared_subject_may_outlive_the_fixture() {
    let mut fx = Fixture::new();
    fx.with_mock::<dyn Source, _>(|source| {
        source.expect_get().times(1).return_const(9);
    });

    let (beacon, mocks) = fx.make(Beacon::new);
    assert_eq!(1, mocks.len());

    drop(fx);
    assert_eq!(9, beacon.read());
}
