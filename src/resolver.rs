// 🔍 Path Resolver - Candidate lookup for a date's daily note
// Tries the common daily-note locations in a fixed priority order.

use crate::vault::{NoteFile, NoteStore};

// ============================================================================
// CANDIDATE GENERATION
// ============================================================================

/// Ordered candidate paths for one year's daily note.
///
/// Priority order is fixed: flat file at the vault root first, then the
/// common folder conventions, then year- and year/month-nested layouts.
/// `month` and `day` must already be 2-digit zero-padded strings.
pub fn candidate_paths(year: i32, month: &str, day: &str) -> Vec<String> {
    vec![
        format!("{year}-{month}-{day}.md"),
        format!("Daily Notes/{year}-{month}-{day}.md"),
        format!("Journal/{year}-{month}-{day}.md"),
        format!("{year}/{year}-{month}-{day}.md"),
        format!("{year}/{month}/{year}-{month}-{day}.md"),
    ]
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve the daily note for `year`-`month`-`day` against a store.
///
/// Candidates are checked in the order of [`candidate_paths`]; the first
/// existing file wins and the remaining candidates are not checked.
/// `None` is a normal outcome (the note for that year may simply not
/// exist) and is never reported as an error.
pub fn resolve(store: &dyn NoteStore, year: i32, month: &str, day: &str) -> Option<NoteFile> {
    for path in candidate_paths(year, month, day) {
        if store.is_file(&path) {
            log::debug!("resolved {}-{}-{} to {}", year, month, day, path);
            return Some(NoteFile::new(path));
        }
    }
    log::debug!("no daily note for {}-{}-{}", year, month, day);
    None
}

// ============================================================================
// TESTS
// ============================================================================
