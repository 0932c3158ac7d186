// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

//! Utility macros for postlog.

/// Times the execution of a block and invokes a callback with the label and elapsed duration.
///
/// In **release builds** the timing is eliminated and only the block executes.
///
/// # Examples
///
/// ```
/// use postlog::timed;
/// use std::time::Duration;
///
/// let result = timed!("my_operation", |label, dur: Duration| {
///     eprintln!("[{label}] took {dur:?}");
/// }, {
///     40 + 2
/// });
/// assert_eq!(result, 42);
/// ```
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! timed {
    ($label:expr, $callback:expr, $block:expr) => {{
        let __timed_start = ::std::time::Instant::now();
        let __timed_result = $block;
        ($callback)($label, __timed_start.elapsed());
        __timed_result
    }};
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! timed {
    ($label:expr, $callback:expr, $block:expr) => {
        $block
    };
}

/// Times a block and reports the duration as a `debug` event on the
/// `postlog::timing` target.
///
/// In **release builds**, this macro is a no-op; only the block executes.
///
/// ```
/// use postlog::timed_dbg;
///
/// let bytes = timed_dbg!("encode", vec![0u8; 16]);
/// assert_eq!(bytes.len(), 16);
/// ```
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! timed_dbg {
    ($label:expr, $block:expr) => {
        $crate::timed!(
            $label,
            |label, elapsed: ::std::time::Duration| {
                $crate::log::macros::debug!(target: "postlog::timing", %label, ?elapsed);
            },
            $block
        )
    };
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! timed_dbg {
    ($label:expr, $block:expr) => {
        $block
    };
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    #[test]
    fn test_timed_returns_block_result() {
        let result = timed!("test", |_: &str, _: Duration| {}, { 42 });
        assert_eq!(result, 42);
    }

    #[test]
    fn test_timed_calls_callback() {
        use std::cell::Cell;

        let called = Cell::new(false);
        let _: () = timed!(
            "test",
            |label: &str, dur: Duration| {
                assert_eq!(label, "test");
                assert!(dur.as_nanos() > 0);
                called.set(true);
            },
            {
                std::thread::sleep(Duration::from_micros(10));
            }
        );

        #[cfg(debug_assertions)]
        assert!(called.get(), "callback should be called in debug builds");
    }

    #[test]
    fn test_timed_dbg_returns_block_result() {
        let result = timed_dbg!("test_op", { "hello" });
        assert_eq!(result, "hello");
    }

    #[test]
    fn test_timed_dbg_propagates_errors() {
        fn fails() -> Result<(), String> {
            timed_dbg!("failing_op", Err::<(), _>("boom".to_string()))?;
            Ok(())
        }
        assert_eq!(fails(), Err("boom".to_string()));
    }
}
