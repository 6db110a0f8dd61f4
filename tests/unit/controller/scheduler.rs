use super::*;

#[test]
fn tokens_are_unique_and_drained_in_order() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    let b = s.request_frame();
    assert_ne!(a, b);
    assert_eq!(s.pending_len(), 2);
    assert_eq!(s.take_due(), vec![a, b]);
    assert_eq!(s.pending_len(), 0);
}

#[test]
fn cancel_only_counts_live_requests() {
    let mut s = ManualScheduler::new();
    let a = s.request_frame();
    s.cancel_frame(a);
    s.cancel_frame(a);
    s.cancel_frame(FrameToken(99));
    assert_eq!(s.cancelled(), 1);
    assert!(s.take_due().is_empty());
}
