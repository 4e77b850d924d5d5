use colored::Colorize;
use travelwise_core::common::{Notice, NoticeKind};
use travelwise_core::kernel::{BaseNotifier, TracingNotifier};

/// Prints notices as coloured toast lines and mirrors them to the log
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    log: TracingNotifier,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BaseNotifier for ConsoleNotifier {
    fn emit(&self, notice: Notice) {
        let line = match notice.kind {
            NoticeKind::Info => format!("ℹ {}", notice.text).bright_cyan(),
            NoticeKind::Success => format!("✔ {}", notice.text).bright_green().bold(),
            NoticeKind::Error => format!("✖ {}", notice.text).bright_red().bold(),
        };
        println!("{}", line);
        self.log.emit(notice);
    }
}
