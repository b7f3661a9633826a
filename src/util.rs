/// Marks a code path which an invariant of the tree or its storage rules out.
///
/// Debug builds panic with `msg`, aborting instead if `unwind_safety` is enabled. Release builds treat the path as unreachable.
///
/// # Safety
/// The path must actually be unreachable.
#[inline]
#[cfg_attr(debug_assertions, track_caller)]
pub unsafe fn unreachable_debugchecked(msg: &str) -> ! {
    #[cfg(debug_assertions)]
    {
        // Reaching this means a node or storage invariant is already broken.
        abort_on_panic(|| unreachable!("{}", msg))
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = msg;
        core::hint::unreachable_unchecked()
    }
}

/// Runs `f`, turning a panic into process exit when `unwind_safety` is enabled.
#[inline]
#[allow(clippy::exit)]
pub fn abort_on_panic<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(feature = "unwind_safety")]
    {
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
            .unwrap_or_else(|_| std::process::exit(101))
    }
    #[cfg(not(feature = "unwind_safety"))]
    {
        f()
    }
}
