use std::fmt::Display;

use crate::error::InvalidValue;

/// A settable, printable flag cell.
///
/// `Display` renders the canonical form of the current state; feeding that
/// text back into [`OptionValue::set`] yields an equal cell.
pub trait OptionValue: Display {
    /// Parse `text` into the cell. On error the previous state is kept.
    fn set(&mut self, text: &str) -> Result<(), InvalidValue>;

    /// Short type tag shown in help output.
    fn type_tag(&self) -> &'static str;

    /// Whether the flag may be given without an argument.
    fn is_bool_flag(&self) -> bool {
        false
    }

    /// Whether `set` has succeeded at least once.
    fn is_set(&self) -> bool;
}

/// Build a fresh cell from a single `set` call.
///
/// Used by the `FromStr` impls so clap can drive the cells as value parsers.
pub(crate) fn parse_fresh<T>(text: &str) -> Result<T, InvalidValue>
where
    T: OptionValue + Default,
{
    let mut value = T::default();
    value.set(text)?;
    Ok(value)
}
