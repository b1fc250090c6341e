//! Form choice lists.
//!
//! Each choice serializes as its lowercase code. Parsing is forgiving: case
//! and surrounding whitespace are ignored, and an empty or unrecognised code
//! falls back to the list's "no effect" entry instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! form_choice {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            /// Strict parse; `None` for codes outside the list.
            pub fn parse(s: &str) -> Option<Self> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $code => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Forgiving parse used at the form boundary.
            pub fn parse_or_fallback(s: &str) -> Self {
                Self::parse(s).unwrap_or(Self::$fallback)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::parse_or_fallback(&s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

form_choice! {
    /// Bed cover material. Only one cover is priced per estimate.
    BedCover, fallback = None {
        #[default]
        None => "none",
        Mulch => "mulch",
        Rock => "rock",
        Topsoil => "topsoil",
    }
}

form_choice! {
    /// Paver quality tier; an unset tier prices as economy.
    PaverTier, fallback = Economy {
        #[default]
        Economy => "economy",
        Mid => "mid",
        Premium => "premium",
    }
}

form_choice! {
    /// Site access difficulty for hardscape work.
    AccessDifficulty, fallback = None {
        #[default]
        None => "none",
        Moderate => "moderate",
        Steep => "steep",
    }
}

form_choice! {
    /// Property size tier for recurring maintenance.
    MaintenanceTier, fallback = None {
        #[default]
        None => "none",
        Small => "s",
        Medium => "m",
        Large => "l",
        ExtraLarge => "xl",
    }
}

form_choice! {
    /// How often a maintenance sub-service is performed.
    Frequency, fallback = None {
        #[default]
        None => "none",
        Weekly => "weekly",
        Biweekly => "biweekly",
        Monthly => "monthly",
    }
}

form_choice! {
    /// Leaf accumulation for seasonal cleanup.
    LeafDepth, fallback = None {
        #[default]
        None => "none",
        Light => "light",
        Medium => "medium",
        Heavy => "heavy",
    }
}

impl Frequency {
    pub fn visits_per_month(&self) -> i64 {
        match self {
            Self::Weekly => 4,
            Self::Biweekly => 2,
            Self::Monthly => 1,
            Self::None => 0,
        }
    }
}

impl MaintenanceTier {
    /// Short display code, as written on the estimate form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::ExtraLarge => "XL",
            Self::None => "",
        }
    }
}
