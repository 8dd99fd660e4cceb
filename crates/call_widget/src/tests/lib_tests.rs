use super::*;
use futures::executor::block_on;

#[test]
fn joined_signal_resolves_after_notify() {
    let (mut notifier, signal) = joined_channel();
    assert!(notifier.notify());
    assert!(notifier.is_spent());
    assert!(block_on(signal));
}

#[test]
fn notifier_fires_only_once() {
    let (mut notifier, _signal) = joined_channel();
    assert!(notifier.notify());
    assert!(!notifier.notify());
}

#[test]
fn dropped_notifier_resolves_signal_as_not_joined() {
    let (notifier, signal) = joined_channel();
    drop(notifier);
    assert!(!block_on(signal));
}

#[test]
fn frame_config_serializes_for_the_widget() {
    let value = serde_json::to_value(CallFrameConfig::default()).expect("json");
    assert_eq!(value["showLeaveButton"], true);
    assert_eq!(value["iframeStyle"]["position"], "fixed");
    assert_eq!(value["iframeStyle"]["width"], "calc(100% - 1rem)");
    assert_eq!(value["iframeStyle"]["height"], "calc(100% - 5rem)");
}
