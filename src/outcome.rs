use std::fmt;

/// Classification of a publication run
///
/// Produced by the resolver, carried through the publisher and consumed by
/// the final report. Each variant maps to a fixed numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The resolver or publisher failed
    Error,
    /// `name@version` is already published
    SameVersion,
    /// The package exists but not at this version
    NewVersion,
    /// The package does not exist in the registry
    NewPackage,
}

impl Outcome {
    pub fn code(self) -> i32 {
        match self {
            Outcome::Error => -1,
            Outcome::SameVersion => 0,
            Outcome::NewVersion => 1,
            Outcome::NewPackage => 2,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Error => "error",
            Outcome::SameVersion => "same-version",
            Outcome::NewVersion => "new-version",
            Outcome::NewPackage => "new-package",
        };
        f.write_str(s)
    }
}
