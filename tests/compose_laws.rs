//! Property-based tests for the pipeable adapter.
//!
//! ## Partial Application Laws
//! - **Equivalence**: `f.call([a])` then `.call([b])` equals `f.call([a, b])`
//! - **Placeholder Filling**: `partial!(f, __, b).call([a]) == f.call([a, b])`
//! - **Reuse**: applying a partial twice gives independent results
//!
//! ## Pipe Laws
//! - **Application**: `pipe(x, f) == f.call([x])`
//! - **Associativity**: `x | f | g == pipe(pipe(x, f), g) == x | (f | g)`
//!
//! ## Arity Law
//! - **Overflow**: `arity + 1` positional arguments always fail with an
//!   arity error naming the function

use composable_soup::compose::{Pipeable, Value, partial, pipe};
use composable_soup::error::{ArityError, SoupError};
use proptest::prelude::*;

fn subtract() -> Pipeable {
    Pipeable::new("subtract", 2, |mut arguments| {
        let left: i64 = arguments.positional(0)?;
        let right: i64 = arguments.positional(1)?;
        Ok(Value::Int(left.wrapping_sub(right)))
    })
}

fn add(amount: i64) -> Pipeable {
    Pipeable::new("add", 1, move |mut arguments| {
        let value: i64 = arguments.positional(0)?;
        Ok(Value::Int(value.wrapping_add(amount)))
    })
}

fn double() -> Pipeable {
    Pipeable::new("double", 1, |mut arguments| {
        let value: i64 = arguments.positional(0)?;
        Ok(Value::Int(value.wrapping_mul(2)))
    })
}

fn collect(arity: usize) -> Pipeable {
    Pipeable::new("collect", arity, |arguments| {
        arguments.into_positional().map(Value::List)
    })
}

// =============================================================================
// Partial Application Laws
// =============================================================================

proptest! {
    /// Supplying arguments one call at a time equals supplying them at once.
    #[test]
    fn prop_partial_application_equivalence(a in any::<i64>(), b in any::<i64>()) {
        let all_at_once = subtract().call([a, b]);
        let one_at_a_time = subtract()
            .call([a])
            .map(|value| value.into_partial().expect("one slot left"))
            .and_then(|partial| partial.call([b]));

        prop_assert_eq!(all_at_once, one_at_a_time);
    }

    /// A placeholder is filled by the first argument of the next call.
    #[test]
    fn prop_placeholder_filling(a in any::<i64>(), b in any::<i64>()) {
        let from_the_right = partial!(subtract(), __, b).call([a]);

        prop_assert_eq!(from_the_right, Ok(Value::Int(a.wrapping_sub(b))));
    }

    /// A partial is not consumed by calling it.
    #[test]
    fn prop_partial_reuse(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
        let from_a = subtract().arg(a);

        prop_assert_eq!(from_a.call([b]), Ok(Value::Int(a.wrapping_sub(b))));
        prop_assert_eq!(from_a.call([c]), Ok(Value::Int(a.wrapping_sub(c))));
        prop_assert_eq!(from_a.remaining(), 1);
    }

    /// Splitting arguments across any number of calls gives the same list.
    #[test]
    fn prop_split_application(values in prop::collection::vec(any::<i64>(), 1..6), split in 0usize..6) {
        let split = split.min(values.len());
        let arity = values.len();
        let (head, tail) = values.split_at(split);

        let expected = Value::List(values.iter().copied().map(Value::Int).collect());
        let staged = match collect(arity).call(head.to_vec()) {
            Ok(Value::Partial(partial)) => partial.call(tail.to_vec()),
            other => other,
        };

        prop_assert_eq!(staged, Ok(expected));
    }
}

// =============================================================================
// Pipe Laws
// =============================================================================

proptest! {
    /// Piping a value is calling with it as the single argument.
    #[test]
    fn prop_pipe_is_application(x in any::<i64>(), amount in any::<i64>()) {
        prop_assert_eq!(pipe(x, &add(amount)), add(amount).call([x]));
    }

    /// The three ways to chain two stages agree.
    #[test]
    fn prop_pipe_associativity(x in any::<i64>(), amount in any::<i64>()) {
        let f = add(amount);
        let g = double();

        let operator = (Value::Int(x) | f.clone() | g.clone()).into_result();
        let nested = pipe(x, &f).and_then(|intermediate| pipe(intermediate, &g));
        let composed = pipe(x, &(f.clone() | g.clone()));
        let via_macro = pipe!(x, f, g);

        prop_assert_eq!(&operator, &nested);
        prop_assert_eq!(&operator, &composed);
        prop_assert_eq!(&operator, &via_macro);
    }

    /// Composition with a partial on the left awaits what the partial awaits.
    #[test]
    fn prop_composed_partial(a in any::<i64>(), b in any::<i64>()) {
        let composed = subtract().arg(a) | double();

        prop_assert_eq!(composed.arity(), 1);
        prop_assert_eq!(pipe(b, &composed), Ok(Value::Int(a.wrapping_sub(b).wrapping_mul(2))));
    }
}

// =============================================================================
// Arity Law
// =============================================================================

proptest! {
    /// One argument more than the arity is always an arity error.
    #[test]
    fn prop_overflow_is_an_arity_error(arity in 0usize..6, seed in any::<i64>()) {
        let arguments: Vec<i64> = (0..=arity as i64).map(|offset| seed.wrapping_add(offset)).collect();

        prop_assert_eq!(
            collect(arity).call(arguments),
            Err(SoupError::Arity(ArityError {
                function: "collect",
                arity,
                supplied: arity + 1,
            }))
        );
    }

    /// Overflow is detected even when split across a partial.
    #[test]
    fn prop_overflow_through_partial(seed in any::<i64>()) {
        let result = subtract()
            .call([seed])
            .map(|value| value.into_partial().expect("one slot left"))
            .and_then(|partial| partial.call([seed, seed]));

        prop_assert!(matches!(result, Err(SoupError::Arity(_))));
    }
}
