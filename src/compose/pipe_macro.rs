//! The `pipe!` macro for left-to-right pipelines.

/// Pipes a value through a series of pipeables from left to right.
///
/// `pipe!(x, f, g, h)` feeds `x` to `f`, the result to `g`, and that result
/// to `h`, stopping at the first error. It evaluates to
/// `Result<Value, SoupError>`.
///
/// # Syntax
///
/// - `pipe!(x)` - `Ok(x)` converted into a `Value`
/// - `pipe!(x, f)` - `f` applied to `x`
/// - `pipe!(x, f, g, ...)` - `...g(f(x))`
///
/// Each stage is an expression evaluating to a `Pipeable`; stages that need
/// more than the piped value are bound beforehand with
/// [`Pipeable::arg`](crate::compose::Pipeable::arg) or
/// [`partial!`](crate::partial!).
///
/// # Relationship with `|`
///
/// `pipe!(x, f, g)` is equivalent to `(x | f | g).into_result()` for the
/// value types that implement the operator.
///
/// # Examples
///
/// ```rust
/// use composable_soup::compose::{Pipeable, Value};
/// use composable_soup::pipe;
///
/// let shout = Pipeable::new("shout", 1, |mut arguments| {
///     let text: String = arguments.positional(0)?;
///     Ok(Value::from(text.to_uppercase()))
/// });
/// let exclaim = Pipeable::new("exclaim", 1, |mut arguments| {
///     let text: String = arguments.positional(0)?;
///     Ok(Value::from(text + "!"))
/// });
///
/// assert_eq!(pipe!("soup", shout, exclaim).unwrap(), Value::from("SOUP!"));
/// ```
#[macro_export]
macro_rules! pipe {
    // Value only: nothing to apply
    ($value:expr $(,)?) => {
        $crate::compose::Pipeline::new($value).into_result()
    };

    // One or more stages, applied left to right
    ($value:expr, $($function:expr),+ $(,)?) => {
        $crate::compose::Pipeline::new($value)
            $(.then(&$function))+
            .into_result()
    };
}
