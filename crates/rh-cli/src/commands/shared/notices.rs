use rh_mirror::{Notice, NoticeLevel};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::ui;

/// Print every queued notice to stderr, unless `--quiet`.
///
/// Call after `settle()` so background confirmations have reported.
pub fn flush(rx: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = rx.try_recv() {
        show(&notice);
    }
}

pub fn show(notice: &Notice) {
    if !ui::prefs().notices {
        return;
    }
    eprintln!("{}", format_notice(notice));
}

fn format_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}
