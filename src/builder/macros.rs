//! Macros for declarative state machine construction.

/// Build a [`StateMachine`](crate::StateMachine) from a transition table.
///
/// Expands to a [`StateMachineBuilder`](crate::builder::StateMachineBuilder)
/// chain ending in `.build()`, so the expression evaluates to
/// `Result<StateMachine<_>, BuildError>`.
///
/// # Example
///
/// ```
/// use quotient::state_machine;
///
/// let machine = state_machine! {
///     initial: 1,
///     states: {
///         1 => "closed".to_string(),
///         2 => "open".to_string(),
///         3 => "locked".to_string(),
///     },
///     accepting: [3],
///     transitions: {
///         1, "open" => 2;
///         2, "close" => 1;
///         1, "lock" => 3;
///     }
/// }
/// .unwrap();
///
/// assert_eq!(machine.state_count(), 3);
/// assert!(machine.state(3).unwrap().accepting);
/// ```
#[macro_export]
macro_rules! state_machine {
    (
        initial: $initial:expr,
        states: { $($id:expr => $value:expr),* $(,)? }
        $(, accepting: [$($acc:expr),* $(,)?])?
        $(, transitions: { $($from:expr, $sym:expr => $to:expr);* $(;)? })?
        $(,)?
    ) => {{
        let builder = $crate::builder::StateMachineBuilder::new()
            $(.state($id, $value))*
            $($(.accepting($acc))*)?
            $($(.transition($from, $sym, $to))*)?
            .initial($initial);
        builder.build()
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn macro_builds_full_machine() {
        let machine = state_machine! {
            initial: 1,
            states: {
                1 => (),
                2 => (),
                3 => (),
            },
            accepting: [3],
            transitions: {
                1, "a" => 2;
                2, "b" => 3;
            }
        }
        .unwrap();

        assert_eq!(machine.state_count(), 3);
        assert_eq!(machine.transition_count(), 2);
        assert!(machine.accepts(&["a", "b"]).unwrap());
    }

    #[test]
    fn macro_works_without_accepting_or_transitions() {
        let machine = state_machine! {
            initial: 1,
            states: { 1 => () },
        }
        .unwrap();

        assert_eq!(machine.state_count(), 1);
        assert_eq!(machine.transition_count(), 0);
    }

    #[test]
    fn macro_surfaces_build_errors() {
        let result = state_machine! {
            initial: 9,
            states: { 1 => () },
        };

        assert!(result.is_err());
    }
}
