use std::fmt;
use std::ops::BitOr;

/// Set of sinks a channel currently emits to.
///
/// Flags are independent booleans packed into one word so a write can
/// snapshot and compare them cheaply. Call sites compose them with `|` and
/// query them with [`contains`](Directions::contains); there is no ordering
/// between flags.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Directions(u32);

impl Directions {
    /// No sink at all.
    pub const NONE: Directions = Directions(0);
    /// An attached debugger console (stderr on this platform).
    pub const DEBUGGER: Directions = Directions(1 << 0);
    /// The channel's configured log file.
    pub const FILE: Directions = Directions(1 << 1);
    /// Raw standard output.
    pub const STDIO: Directions = Directions(1 << 2);
    /// The OS event log, through the installed adapter.
    pub const EVENT: Directions = Directions(1 << 3);

    /// True when every flag in `other` is set in `self`.
    pub const fn contains(self, other: Directions) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when `self` and `other` share at least one flag.
    pub const fn intersects(self, other: Directions) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `self` with every flag in `other` cleared. Idempotent.
    pub const fn without(self, other: Directions) -> Directions {
        Directions(self.0 & !other.0)
    }

    /// Returns `self` with every flag in `other` set. Idempotent.
    pub const fn with(self, other: Directions) -> Directions {
        Directions(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Directions {
    type Output = Directions;

    fn bitor(self, rhs: Directions) -> Directions {
        self.with(rhs)
    }
}

impl fmt::Debug for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in [
            (Directions::DEBUGGER, "Debugger"),
            (Directions::FILE, "File"),
            (Directions::STDIO, "Stdio"),
            (Directions::EVENT, "Event"),
        ] {
            if self.contains(flag) {
                set.entry(&name);
            }
        }
        set.finish()
    }
}

/// One-shot overrides applied to a single write call.
///
/// Unlike [`Directions`], these are never stored on a channel: they widen or
/// suppress sink selection for exactly one call and then vanish.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Mods(u32);

impl Mods {
    /// No override; the channel's persisted directions decide everything.
    pub const NONE: Mods = Mods(0);
    /// Suppress the call entirely, on every sink. Wins over all other
    /// overrides. Lets intentionally-disabled call sites stay in the code.
    pub const DROP: Mods = Mods(1 << 0);
    /// Request a debugger trap in addition to normal output.
    pub const BREAKPOINT: Mods = Mods(1 << 1);
    /// Bypass the release-build suppression of Debug/Trace channels.
    pub const FORCE: Mods = Mods(1 << 2);
    /// Write to the file sink for this call, whatever the channel says.
    pub const FILE: Mods = Mods(1 << 3);
    /// Tag the line `[ERROR:CRITICAL]` and route it to the event sink.
    pub const CRIT_ERROR: Mods = Mods(1 << 4);
    /// Emit to the event sink for this call, without the critical tag.
    pub const EVENT: Mods = Mods(1 << 5);

    pub const fn contains(self, other: Mods) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Mods) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Mods {
    type Output = Mods;

    fn bitor(self, rhs: Mods) -> Mods {
        Mods(self.0 | rhs.0)
    }
}

impl fmt::Debug for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in [
            (Mods::DROP, "Drop"),
            (Mods::BREAKPOINT, "Breakpoint"),
            (Mods::FORCE, "Force"),
            (Mods::FILE, "File"),
            (Mods::CRIT_ERROR, "CritError"),
            (Mods::EVENT, "Event"),
        ] {
            if self.contains(flag) {
                set.entry(&name);
            }
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_order_independent() {
        let a = Directions::DEBUGGER | Directions::FILE;
        let b = Directions::FILE | Directions::DEBUGGER;
        assert_eq!(a, b);
        assert!(a.contains(Directions::DEBUGGER));
        assert!(a.contains(Directions::FILE));
        assert!(!a.contains(Directions::STDIO));
    }

    #[test]
    fn without_is_idempotent() {
        let dirs = Directions::DEBUGGER | Directions::FILE;
        let once = dirs.without(Directions::FILE);
        let twice = once.without(Directions::FILE);
        assert_eq!(once, twice);
        assert_eq!(once, Directions::DEBUGGER);
    }

    #[test]
    fn with_is_idempotent() {
        let dirs = Directions::DEBUGGER.with(Directions::FILE);
        assert_eq!(dirs, dirs.with(Directions::FILE));
    }

    #[test]
    fn contains_tests_full_membership() {
        let dirs = Directions::DEBUGGER | Directions::FILE;
        assert!(dirs.contains(Directions::DEBUGGER | Directions::FILE));
        assert!(!dirs.contains(Directions::DEBUGGER | Directions::EVENT));
        assert!(dirs.intersects(Directions::DEBUGGER | Directions::EVENT));
    }

    #[test]
    fn empty_set_contains_nothing() {
        assert!(Directions::NONE.is_empty());
        assert!(!Directions::NONE.intersects(Directions::DEBUGGER));
        // The empty set is a subset of everything.
        assert!(Directions::DEBUGGER.contains(Directions::NONE));
    }

    #[test]
    fn mods_compose_by_union() {
        let mods = Mods::FORCE | Mods::FILE;
        assert!(mods.contains(Mods::FORCE));
        assert!(mods.contains(Mods::FILE));
        assert!(!mods.contains(Mods::DROP));
        assert!(mods.intersects(Mods::FILE | Mods::EVENT));
    }
}
