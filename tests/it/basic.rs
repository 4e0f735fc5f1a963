use sutkit::mockall::automock;
use sutkit::mockall::predicate::eq;
use sutkit::{mockable, Fixture};

#[automock]
trait Transport {
    fn send(&self, frame: i32);
    fn describe(&self, code: i32, label: String);
}

mockable!(dyn Transport => MockTransport);

struct Uplink<'a> {
    channel: i32,
    transport: &'a dyn Transport,
}

impl<'a> Uplink<'a> {
    fn new(channel: i32, transport: &'a dyn Transport) -> Self {
        Self { channel, transport }
    }

    fn channel(&self) -> i32 {
        self.channel
    }

    fn flush(&self) {
        self.transport.send(42);
        self.transport.describe(1, "str".to_string());
    }
}

fn expect_flush(transport: &mut MockTransport) {
    transport.expect_send().with(eq(42)).times(1).return_const(());
    transport
        .expect_describe()
        .withf(|&code, label| code == 1 && label.as_str() == "str")
        .return_const(());
}

#[test]
fn synthesizes_a_mock_for_the_interface_slot() {
    let mut fx = Fixture::new();
    fx.with_mock::<dyn Transport, _>(expect_flush);

    let (uplink, mocks) = fx.make(Uplink::new);
    assert_eq!(1, mocks.len());
    assert!(mocks.contains::<dyn Transport>());
    assert_eq!(0, uplink.channel());

    uplink.flush();
}

#[test]
fn explicit_argument_overrides_the_default() {
    let mut fx = Fixture::new();
    fx.with_mock::<dyn Transport, _>(expect_flush);

    let (uplink, mocks) = fx.make_with(Uplink::new, (123,));
    assert_eq!(1, mocks.len());
    assert_eq!(123, uplink.channel());

    uplink.flush();
}

#[test]
fn mock_inventory_reports_interface_names() {
    let mut fx = Fixture::new();
    let (_uplink, mocks) = fx.make(Uplink::new);

    let names: Vec<_> = mocks.iter().map(|info| info.name()).collect();
    assert_eq!(vec!["Transport"], names);
}
