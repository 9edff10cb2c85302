use bord_model::core::logging::{init_json_logging, init_logging};
use bord_model::{Post, Validate};

#[test]
fn logger_installs_once() {
    init_logging(true).expect("first install succeeds");
    assert!(init_json_logging().is_err(), "a second global subscriber is refused");

    // Rejections are logged through the installed subscriber, not panicked on.
    assert!(Post::new("u-1", "").validate().is_err());
}
