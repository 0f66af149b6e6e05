//! Free-text matching against the directory.
//!
//! Plain lowercase substring containment against code or name, no
//! tokenizing and no relevance ranking. Results always keep directory
//! order.

use crate::directory::{BankIdentifierEntry, Directory};

fn matches(entry: &BankIdentifierEntry, needle: &str) -> bool {
    entry.code.to_lowercase().contains(needle) || entry.name.to_lowercase().contains(needle)
}

/// All entries matching `text`, in directory order.
///
/// The empty string is a substring of everything, so empty input
/// matches the whole directory; callers rely on that.
pub fn filter(directory: &Directory, text: &str) -> Vec<BankIdentifierEntry> {
    let needle = text.to_lowercase();
    directory
        .entries()
        .iter()
        .filter(|entry| matches(entry, &needle))
        .cloned()
        .collect()
}

/// The first entry matching `text`, in directory order. Used once the
/// live suggestion list has already been dismissed.
pub fn resolve_first(directory: &Directory, text: &str) -> Option<BankIdentifierEntry> {
    let needle = text.to_lowercase();
    directory.entries().iter().find(|entry| matches(entry, &needle)).cloned()
}

/// Canonical completion for an accepted match: the code when the input
/// is (part of) the code, the bank name otherwise.
pub fn complete(text: &str, entry: &BankIdentifierEntry) -> String {
    if entry.code.to_lowercase().contains(&text.to_lowercase()) {
        entry.code.clone()
    } else {
        entry.name.clone()
    }
}
