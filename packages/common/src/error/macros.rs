//! Macros for call-site capture and diagnostic creation

/// Capture the current file, line and enclosing function as a `CallSite`
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::error::CallSite::new(file!(), line!(), $crate::function_name!())
    };
}

/// Bare name of the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::error::macros::bare_function_name(__type_name_of(__here))
    }};
}

/// Reduce a `type_name` path of the `function_name!` probe to the function name
///
/// Closure and async-block frames are skipped so the innermost named
/// function is reported.
#[doc(hidden)]
#[must_use]
pub fn bare_function_name(path: &'static str) -> &'static str {
    let path = path.strip_suffix("::__here").unwrap_or(path);
    path.rsplit("::")
        .find(|segment| *segment != "{{closure}}")
        .unwrap_or(path)
}

/// Create a diagnostic at the current call-site without logging it
#[macro_export]
macro_rules! diag {
    ($msg:literal $(,)?) => {
        $crate::error::DiagnosticError::new(format_args!($msg), $crate::call_site!(), false)
    };
    ($err:expr $(,)?) => {
        $crate::error::DiagnosticError::new($err, $crate::call_site!(), false)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DiagnosticError::new(format_args!($fmt, $($arg)*), $crate::call_site!(), false)
    };
}

/// Create a diagnostic at the current call-site and log it immediately
#[macro_export]
macro_rules! diag_log {
    ($msg:literal $(,)?) => {
        $crate::error::DiagnosticError::new(format_args!($msg), $crate::call_site!(), true)
    };
    ($err:expr $(,)?) => {
        $crate::error::DiagnosticError::new($err, $crate::call_site!(), true)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DiagnosticError::new(format_args!($fmt, $($arg)*), $crate::call_site!(), true)
    };
}

/// Macro for bailing out with a diagnostic
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return ::core::result::Result::Err($crate::diag!($($arg)*))
    };
}

/// Macro for ensuring a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::bail!(concat!("condition failed: `", stringify!($cond), "`"));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
