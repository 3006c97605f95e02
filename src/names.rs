//! Collision-free naming for exported elements
//!
//! Figma documents routinely contain many layers with the same name ("Icon",
//! "Frame 1"). Every exported element ends up as a file, so names are made
//! unique across the whole run before any path is built.

use std::collections::{HashMap, HashSet};

/// Hands out unique names for one export run
///
/// The first occurrence of a name is returned unchanged; later occurrences get
/// a `-1`, `-2`, ... suffix. A suffixed name that was already handed out (for
/// example because a layer is literally called "Icon-1") is skipped, so every
/// name returned by one resolver is distinct.
///
/// # Examples
///
/// ```
/// use figma_export::UniqueNameResolver;
///
/// let mut names = UniqueNameResolver::new();
/// assert_eq!(names.get("Icon"), "Icon");
/// assert_eq!(names.get("Icon"), "Icon-1");
/// assert_eq!(names.get("Icon"), "Icon-2");
/// ```
#[derive(Debug, Default)]
pub struct UniqueNameResolver {
    /// Suffixes already consumed per base name
    counters: HashMap<String, usize>,
    /// Every name returned so far
    issued: HashSet<String>,
}

impl UniqueNameResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a unique name for `candidate`
    pub fn get(&mut self, candidate: &str) -> String {
        if self.issued.insert(candidate.to_string()) {
            self.counters.entry(candidate.to_string()).or_insert(0);
            return candidate.to_string();
        }

        let counter = self.counters.entry(candidate.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let name = format!("{candidate}-{counter}");
            if self.issued.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Number of names handed out so far
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Whether no name has been handed out yet
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
