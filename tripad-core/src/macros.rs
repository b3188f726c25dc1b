//! Macro-string table
//!
//! Key bindings with a nonzero macro index type the string in slot
//! `index - 1` verbatim. The table starts from built-in snippets and can be
//! overridden once at boot from a flash region laid out as:
//!
//! ```text
//! <decimal count>\n<entry>\0<entry>\n...
//! ```
//!
//! Entries end at `\0` or `\n`. A region starting with `\0` or `0xFF`
//! (erased flash), or declaring a count of zero, keeps the defaults.

use heapless::{String, Vec};

/// Maximum number of macro strings
pub const MAX_MACROS: usize = 16;

/// Maximum length of a single macro string in bytes
pub const MAX_MACRO_LEN: usize = 64;

/// Built-in macro strings
pub const DEFAULT_MACROS: [&str; 3] = ["Thank you!", "Best regards,", "git status"];

/// Errors while parsing a macro override region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroOverrideError {
    /// Count line is missing, empty or not a decimal number
    InvalidCount,
    /// Declared count exceeds `MAX_MACROS`
    TooMany,
    /// Region ended before all declared entries were terminated
    Truncated,
    /// An entry exceeds `MAX_MACRO_LEN`
    EntryTooLong,
    /// An entry contains a byte that cannot be typed
    InvalidChar,
}

/// Ordered table of macro strings
#[derive(Debug, Clone)]
pub struct MacroTable {
    entries: Vec<String<MAX_MACRO_LEN>, MAX_MACROS>,
}

impl MacroTable {
    /// Table holding the built-in defaults
    pub fn new() -> Self {
        let mut entries = Vec::new();
        for text in DEFAULT_MACROS {
            let mut entry = String::new();
            // Defaults are short compile-time literals
            let _ = entry.push_str(text);
            let _ = entries.push(entry);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the string a binding's macro index refers to
    ///
    /// Index 0 means "no macro" and always returns `None`.
    pub fn get(&self, index: u8) -> Option<&str> {
        let slot = (index as usize).checked_sub(1)?;
        self.entries.get(slot).map(|s| s.as_str())
    }

    /// Whether a nonzero `index` names an existing slot
    pub fn contains(&self, index: u8) -> bool {
        self.get(index).is_some()
    }

    /// Apply an override region, returning how many slots were replaced
    ///
    /// The whole region is validated before any slot changes, so an error
    /// leaves the table untouched. Slots beyond the declared count keep
    /// their previous contents.
    pub fn apply_override(&mut self, data: &[u8]) -> Result<usize, MacroOverrideError> {
        let parsed = parse_override(data)?;
        let count = parsed.len();

        for (slot, entry) in parsed.into_iter().enumerate() {
            if slot < self.entries.len() {
                self.entries[slot] = entry;
            } else {
                self.entries
                    .push(entry)
                    .map_err(|_| MacroOverrideError::TooMany)?;
            }
        }

        Ok(count)
    }
}

impl Default for MacroTable {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminator(byte: u8) -> bool {
    byte == 0x00 || byte == b'\n'
}

fn is_typeable(byte: u8) -> bool {
    byte == b'\t' || (0x20..0x7F).contains(&byte)
}

fn parse_override(
    data: &[u8],
) -> Result<Vec<String<MAX_MACRO_LEN>, MAX_MACROS>, MacroOverrideError> {
    let mut parsed = Vec::new();

    match data.first() {
        None | Some(0x00) | Some(0xFF) => return Ok(parsed),
        _ => {}
    }

    let newline = data
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(MacroOverrideError::InvalidCount)?;
    let count = parse_count(&data[..newline])?;
    if count > MAX_MACROS {
        return Err(MacroOverrideError::TooMany);
    }

    let mut rest = &data[newline + 1..];
    for _ in 0..count {
        let end = rest
            .iter()
            .position(|&b| is_terminator(b))
            .ok_or(MacroOverrideError::Truncated)?;
        let raw = &rest[..end];

        if raw.len() > MAX_MACRO_LEN {
            return Err(MacroOverrideError::EntryTooLong);
        }
        if !raw.iter().all(|&b| is_typeable(b)) {
            return Err(MacroOverrideError::InvalidChar);
        }

        let text = core::str::from_utf8(raw).map_err(|_| MacroOverrideError::InvalidChar)?;
        let mut entry = String::new();
        entry
            .push_str(text)
            .map_err(|_| MacroOverrideError::EntryTooLong)?;
        parsed
            .push(entry)
            .map_err(|_| MacroOverrideError::TooMany)?;

        rest = &rest[end + 1..];
    }

    Ok(parsed)
}

fn parse_count(line: &[u8]) -> Result<usize, MacroOverrideError> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() || line.len() > 3 {
        return Err(MacroOverrideError::InvalidCount);
    }
    line.iter().try_fold(0usize, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + (b - b'0') as usize)
        } else {
            Err(MacroOverrideError::InvalidCount)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = MacroTable::new();
        assert_eq!(table.len(), DEFAULT_MACROS.len());
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(1), Some("Thank you!"));
        assert_eq!(table.get(3), Some("git status"));
        assert_eq!(table.get(4), None);
    }

    #[test]
    fn test_override_replaces_first_two_slots() {
        let mut table = MacroTable::new();
        let count = table.apply_override(b"2\nhello\0world\n\xff\xff").unwrap();

        assert_eq!(count, 2);
        assert_eq!(table.get(1), Some("hello"));
        assert_eq!(table.get(2), Some("world"));
        assert_eq!(table.get(3), Some("git status"));
        assert_eq!(table.len(), DEFAULT_MACROS.len());
    }

    #[test]
    fn test_override_grows_table() {
        let mut table = MacroTable::new();
        let count = table.apply_override(b"4\na\0b\0c\0d\0").unwrap();

        assert_eq!(count, 4);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(4), Some("d"));
    }

    #[test]
    fn test_erased_or_empty_region_keeps_defaults() {
        let regions: [&[u8]; 4] = [b"", b"\0abc", b"\xff\xff\xff", b"0\n"];
        for region in regions {
            let mut table = MacroTable::new();
            assert_eq!(table.apply_override(region), Ok(0));
            assert_eq!(table.get(1), Some("Thank you!"));
        }
    }

    #[test]
    fn test_truncated_override_rejected() {
        let mut table = MacroTable::new();
        assert_eq!(
            table.apply_override(b"3\none\0two\0thr"),
            Err(MacroOverrideError::Truncated)
        );
        // Nothing applied
        assert_eq!(table.get(1), Some("Thank you!"));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut table = MacroTable::new();
        assert_eq!(
            table.apply_override(b"x\nabc\0"),
            Err(MacroOverrideError::InvalidCount)
        );
        assert_eq!(
            table.apply_override(b"2 items"),
            Err(MacroOverrideError::InvalidCount)
        );
        assert_eq!(
            table.apply_override(b"17\n"),
            Err(MacroOverrideError::TooMany)
        );
        assert_eq!(
            table.apply_override(b"1\nbad\x01byte\0"),
            Err(MacroOverrideError::InvalidChar)
        );

        let mut long = std::vec::Vec::from(&b"1\n"[..]);
        long.extend(core::iter::repeat(b'a').take(MAX_MACRO_LEN + 1));
        long.push(0);
        assert_eq!(
            table.apply_override(&long),
            Err(MacroOverrideError::EntryTooLong)
        );
        assert_eq!(table.get(1), Some("Thank you!"));
    }

    #[test]
    fn test_crlf_count_line() {
        let mut table = MacroTable::new();
        assert_eq!(table.apply_override(b"1\r\ntab\there\0"), Ok(1));
        assert_eq!(table.get(1), Some("tab\there"));
    }
}
