//! Macros for declaring state and event enums.

#[doc(hidden)]
#[macro_export]
macro_rules! __named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];

            /// Variant whose name is `name`, if any.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($label => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

/// Declare an enum implementing [`State`](crate::core::State).
///
/// Each variant is paired with its persisted name, which is used by
/// `name()`, `Display` and serde.
///
/// # Example
///
/// ```
/// use provision_fsm::core::State;
/// use provision_fsm::state_enum;
///
/// state_enum! {
///     pub enum DiskState {
///         Clean => "clean",
///         Wiping => "wiping",
///         WipeFailed => "wipe failed",
///     }
/// }
///
/// assert_eq!(DiskState::WipeFailed.name(), "wipe failed");
/// assert_eq!(DiskState::from_name("wiping"), Some(DiskState::Wiping));
/// assert_eq!(DiskState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($body:tt)* }
    ) => {
        $crate::__named_enum! {
            $(#[$meta])*
            $vis enum $name { $($body)* }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                self.label()
            }
        }
    };
}

/// Declare an enum implementing [`Event`](crate::core::Event).
///
/// Same shape as [`state_enum!`].
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($body:tt)* }
    ) => {
        $crate::__named_enum! {
            $(#[$meta])*
            $vis enum $name { $($body)* }
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                self.label()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Idle => "idle",
            Busy => "busy right now",
        }
    }

    event_enum! {
        enum TestEvent {
            Poke => "poke",
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Idle.name(), "idle");
        assert_eq!(TestState::Busy.name(), "busy right now");
        assert_eq!(TestState::Busy.to_string(), "busy right now");
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::Poke.name(), "poke");
        assert_eq!(TestEvent::from_name("poke"), Some(TestEvent::Poke));
        assert_eq!(TestEvent::from_name("prod"), None);
    }

    #[test]
    fn serde_uses_declared_names() {
        let json = serde_json::to_string(&TestState::Busy).unwrap();
        assert_eq!(json, "\"busy right now\"");

        let parsed: TestState = serde_json::from_str("\"idle\"").unwrap();
        assert_eq!(parsed, TestState::Idle);
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A => "a",
                B => "b",
            }
        }

        assert_eq!(PublicState::ALL, &[PublicState::A, PublicState::B]);
    }
}
