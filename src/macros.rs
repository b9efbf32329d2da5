//! Macros for declaring status enums.

/// Declare a status enum together with its `State` implementation.
///
/// # Example
///
/// ```
/// use objectsim::core::State;
/// use objectsim::state_enum;
///
/// state_enum! {
///     pub enum TicketStatus {
///         Open,
///         Resolved,
///         Archived,
///     }
///     final: [Archived]
/// }
///
/// assert_eq!(TicketStatus::Open.name(), "Open");
/// assert!(TicketStatus::Archived.is_final());
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
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
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
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
