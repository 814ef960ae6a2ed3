use std::sync::atomic::{AtomicU64, Ordering};

static ERROR_EMISSIONS: AtomicU64 = AtomicU64::new(0);

/// Prints one error line. Every `error!` invocation lands here, so the
/// emission count is observable.
#[doc(hidden)]
pub fn emit_error(line: &str) {
    ERROR_EMISSIONS.fetch_add(1, Ordering::Relaxed);
    println!(
        "\x1b[31m[ERROR][{}]\x1b[0m {}",
        chrono::Utc::now().format("%H:%M:%S"),
        line
    );
}

/// Number of `error!` lines emitted so far in this process.
#[cfg(test)]
pub(crate) fn error_emissions() -> u64 { ERROR_EMISSIONS.load(Ordering::Relaxed) }

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        println!("\x1b[32m[INFO] [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        println!("\x1b[35m[WARN] [{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::emit_error(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        panic!("\x1b[1;31m[FATAL][{}]\x1b[0m {}", chrono::Utc::now().format("%H:%M:%S"), format!($($arg)*))
    };
}
