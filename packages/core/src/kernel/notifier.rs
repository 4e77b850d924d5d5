use tracing::{error, info};

use super::BaseNotifier;
use crate::common::{Notice, NoticeKind};

/// Notifier that only writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl BaseNotifier for TracingNotifier {
    fn emit(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => error!(notice = %notice.text, "user notice"),
            NoticeKind::Info | NoticeKind::Success => info!(notice = %notice.text, "user notice"),
        }
    }
}
