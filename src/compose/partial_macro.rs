//! The `partial!` macro for binding arguments with placeholders.

/// Binds arguments to a pipeable, leaving `__` positions open.
///
/// `partial!(f, a, __, c)` expands to
/// `f.arg(a).placeholder().arg(c)`: nothing runs until the result is called
/// with the missing arguments, which fill the placeholders in order.
///
/// **Important**: `__` is matched as a literal token; there is nothing to
/// import.
///
/// # Syntax
///
/// For a pipeable `f` of arity 3:
/// - `partial!(f, a, __, __)` awaits the second and third arguments
/// - `partial!(f, __, b, __)` awaits the first and third arguments
/// - `partial!(f, a, b, c)` binds everything; run it with `.invoke()`
/// - `partial!(f)` is `f` unchanged
///
/// # Examples
///
/// ```rust
/// use composable_soup::compose::{Pipeable, Value};
/// use composable_soup::partial;
///
/// let between = Pipeable::new("between", 3, |mut arguments| {
///     let low: i64 = arguments.positional(0)?;
///     let value: i64 = arguments.positional(1)?;
///     let high: i64 = arguments.positional(2)?;
///     Ok(Value::from(low <= value && value <= high))
/// });
///
/// let is_digit = partial!(between, 0_i64, __, 9_i64);
/// assert_eq!(is_digit.call([7_i64]).unwrap(), Value::Bool(true));
/// assert_eq!(is_digit.call([12_i64]).unwrap(), Value::Bool(false));
/// ```
#[macro_export]
macro_rules! partial {
    // =========================================================================
    // Internal rules (must come first)
    // =========================================================================

    (@bind $pipeable:expr;) => {
        $pipeable
    };

    (@bind $pipeable:expr; __ $(, $($rest:tt)*)?) => {
        $crate::partial!(@bind $pipeable.placeholder(); $($($rest)*)?)
    };

    (@bind $pipeable:expr; $argument:expr $(, $($rest:tt)*)?) => {
        $crate::partial!(@bind $pipeable.arg($argument); $($($rest)*)?)
    };

    // =========================================================================
    // Entry point
    // =========================================================================

    ($function:expr $(, $($arguments:tt)*)?) => {
        $crate::partial!(@bind $function; $($($arguments)*)?)
    };
}

#[cfg(test)]
mod tests {
    use crate::compose::{Pipeable, Value};
    use crate::error::SoupError;
    use rstest::rstest;

    fn describe() -> Pipeable {
        Pipeable::new("describe", 3, |mut arguments| {
            let first: String = arguments.positional(0)?;
            let second: String = arguments.positional(1)?;
            let third: String = arguments.positional(2)?;
            Ok(Value::from(format!("{first}-{second}-{third}")))
        })
    }

    #[rstest]
    #[case(partial!(describe(), "a", __, __), vec!["b", "c"])]
    #[case(partial!(describe(), __, "b", __), vec!["a", "c"])]
    #[case(partial!(describe(), __, __, "c"), vec!["a", "b"])]
    #[case(partial!(describe(), "a", "b", __), vec!["c"])]
    #[case(partial!(describe(), __, "b", "c",), vec!["a"])]
    #[case(partial!(describe()), vec!["a", "b", "c"])]
    fn placeholders_keep_declared_order(#[case] bound: Pipeable, #[case] rest: Vec<&str>) {
        assert_eq!(bound.call(rest), Ok(Value::from("a-b-c")));
    }

    #[rstest]
    fn fully_bound_runs_on_invoke() {
        let thunk = partial!(describe(), "x", "y", "z");

        assert_eq!(thunk.remaining(), 0);
        assert_eq!(thunk.invoke(), Ok(Value::from("x-y-z")));
    }

    #[rstest]
    fn binding_too_many_fails_when_called() {
        let overbound = partial!(describe(), "a", "b", "c", "d");

        assert!(matches!(overbound.call(Vec::<Value>::new()), Err(SoupError::Arity(_))));
    }
}
