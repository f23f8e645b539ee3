// Without the defmt feature, arguments are only borrowed to keep them used.

macro_rules! info {
    ( $fmt:literal $(, $arg:expr)* $(,)? ) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! debug {
    ( $fmt:literal $(, $arg:expr)* $(,)? ) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! log_warn {
    ( $fmt:literal $(, $arg:expr)* $(,)? ) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

pub(crate) use debug;
pub(crate) use info;
pub(crate) use log_warn as warn;
