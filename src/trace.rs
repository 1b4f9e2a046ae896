//! Build-time-gated diagnostic tracing (§4.16), mirroring the original
//! engine's `CCPM_CFG_PRINTF` compile-time switch: with the `trace`
//! feature off, [`trace!`] compiles away entirely; with it on, each
//! pipeline stage's progress goes to stderr.

#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        eprintln!("[aoaconv] {}", format!($($arg)*));
    };
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}
