//! Modifier bit flags and bitmask helpers.
//!
//! Modifiers are plain `u32` bitmasks so callers can combine arbitrary bit
//! patterns; nothing here validates that a mask only uses known flags.

/// Visible outside its declaring scope.
pub const PUBLIC: u32 = 0x0001;
/// Visible only inside its declaring type.
pub const PRIVATE: u32 = 0x0002;
/// Visible to subtypes and the declaring scope.
pub const PROTECTED: u32 = 0x0004;
/// Associated with the type rather than an instance.
pub const STATIC: u32 = 0x0008;
/// Cannot be overridden, extended or reassigned.
pub const FINAL: u32 = 0x0010;
/// Guarded by the owner's monitor.
pub const SYNCHRONIZED: u32 = 0x0020;
/// Not cached across threads.
pub const VOLATILE: u32 = 0x0040;
/// Skipped by serialization.
pub const TRANSIENT: u32 = 0x0080;
/// Implemented outside the catalog's language.
pub const NATIVE: u32 = 0x0100;
/// Set on interface types.
pub const INTERFACE: u32 = 0x0200;
/// Declared without a complete implementation.
pub const ABSTRACT: u32 = 0x0400;
/// Strict floating-point semantics.
pub const STRICT: u32 = 0x0800;

const NAMED_FLAGS: &[(&str, u32)] = &[
    ("public", PUBLIC),
    ("private", PRIVATE),
    ("protected", PROTECTED),
    ("static", STATIC),
    ("final", FINAL),
    ("synchronized", SYNCHRONIZED),
    ("volatile", VOLATILE),
    ("transient", TRANSIENT),
    ("native", NATIVE),
    ("interface", INTERFACE),
    ("abstract", ABSTRACT),
    ("strict", STRICT),
];

/// Check whether `mask` contains every bit of `flags`.
///
/// A zero `flags` value is contained in every mask.
#[inline]
pub fn has_flags(mask: u32, flags: u32) -> bool {
    (mask & flags) == flags
}

/// Fold several flag values into one mask with bitwise OR.
pub fn fold_flags(flags: &[u32]) -> u32 {
    flags.iter().fold(0, |acc, flag| acc | flag)
}

/// Look up a flag by its lowercase keyword (`"public"`, `"static"`, ...).
pub fn from_name(name: &str) -> Option<u32> {
    let name = name.trim();
    NAMED_FLAGS
        .iter()
        .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
        .map(|(_, bits)| *bits)
}

/// Render the known flags in `mask` as keywords, in declaration order.
pub fn names(mask: u32) -> Vec<&'static str> {
    NAMED_FLAGS
        .iter()
        .filter(|(_, bits)| has_flags(mask, *bits))
        .map(|(keyword, _)| *keyword)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_flags_requires_every_bit() {
        assert!(has_flags(PUBLIC | STATIC, PUBLIC));
        assert!(has_flags(PUBLIC | STATIC, PUBLIC | STATIC));
        assert!(!has_flags(PUBLIC, PUBLIC | STATIC));
        assert!(!has_flags(PRIVATE, PUBLIC));
    }

    #[test]
    fn zero_flags_match_any_mask() {
        assert!(has_flags(0, 0));
        assert!(has_flags(PRIVATE | FINAL, 0));
    }

    #[test]
    fn has_flags_does_not_collapse_to_low_bit() {
        // An even mask carrying STATIC must still be matched by STATIC.
        assert!(has_flags(STATIC | FINAL, STATIC));
        assert!(!has_flags(PUBLIC, STATIC));
    }

    #[test]
    fn fold_flags_ors_everything() {
        assert_eq!(fold_flags(&[]), 0);
        assert_eq!(fold_flags(&[PUBLIC, STATIC, FINAL]), PUBLIC | STATIC | FINAL);
        assert_eq!(fold_flags(&[PUBLIC, PUBLIC]), PUBLIC);
    }

    #[test]
    fn names_round_trip_through_lookup() {
        assert_eq!(from_name("Public"), Some(PUBLIC));
        assert_eq!(from_name("abstract"), Some(ABSTRACT));
        assert_eq!(from_name("sealed"), None);
        assert_eq!(names(PUBLIC | STATIC), vec!["public", "static"]);
    }
}
