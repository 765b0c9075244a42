// Panic hooks are process-global, so this lives in its own test binary.

use overhead_tui::terminal::install_hooks_with;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn cleanup_still_runs_with_color_eyre_installed() {
    let cleanups = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&cleanups);
    install_hooks_with(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    let result = std::panic::catch_unwind(|| panic!("render failed"));
    assert!(result.is_err());
    assert_eq!(cleanups.load(Ordering::SeqCst), 1);

    // a second install would fail and must not have replaced anything
    assert!(install_hooks_with(|| {}).is_err());
    let _ = std::panic::catch_unwind(|| panic!("again"));
    assert_eq!(cleanups.load(Ordering::SeqCst), 2);
}
