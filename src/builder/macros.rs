//! Macros for declaring game phases.

/// Declare a phase enum and derive its [`State`](crate::core::State) impl.
///
/// The enum gets `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug` and
/// serde derives. Attributes written above the enum are applied after the
/// derives, so serde container attributes work.
///
/// # Example
///
/// ```
/// use mindgames::state_enum;
/// use mindgames::core::State;
///
/// state_enum! {
///     #[serde(rename_all = "snake_case")]
///     pub enum QuizPhase {
///         Lobby,
///         Asking,
///         Finished,
///     }
///     final: [Finished]
///     input: [Asking]
/// }
///
/// assert_eq!(QuizPhase::Asking.name(), "Asking");
/// assert!(QuizPhase::Finished.is_final());
/// assert!(QuizPhase::Asking.accepts_input());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(input: [$($input:ident),* $(,)?])?
    ) => {
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn accepts_input(&self) -> bool {
                match self {
                    $($(Self::$input => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestPhase {
            Menu,
            Playing,
            Recall,
            Over,
        }
        final: [Over]
        input: [Playing, Recall]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestPhase::Menu.name(), "Menu");
        assert!(!TestPhase::Menu.is_final());
        assert!(!TestPhase::Menu.accepts_input());

        assert!(TestPhase::Playing.accepts_input());
        assert!(TestPhase::Recall.accepts_input());

        assert!(TestPhase::Over.is_final());
        assert!(!TestPhase::Over.accepts_input());
    }

    #[test]
    fn state_enum_applies_serde_attributes() {
        state_enum! {
            #[serde(rename_all = "snake_case")]
            pub enum SnakePhase {
                GameOver,
            }
            final: [GameOver]
        }

        let json = serde_json::to_string(&SnakePhase::GameOver).unwrap();
        assert_eq!(json, "\"game_over\"");
    }

    #[test]
    fn state_enum_works_without_lists() {
        state_enum! {
            enum MinimalPhase {
                One,
                Two,
            }
        }

        let phase = MinimalPhase::Two;
        assert!(!phase.is_final());
        assert!(!phase.accepts_input());
        assert_eq!(MinimalPhase::One.name(), "One");
    }
}
