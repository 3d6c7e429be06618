//! Working-directory entries and the file/directory selection policy.
use std::fmt;

/// Kind of a directory entry, as reported without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, sockets, devices, non-UTF-8 names, or unreadable types.
    Invalid,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Invalid => "other",
        };
        f.write_str(label)
    }
}

/// One entry of the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Which entry kinds a run acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    files: bool,
    dirs: bool,
}

impl Selection {
    /// Neither flag means both kinds are eligible.
    pub fn from_flags(files: bool, dirs: bool) -> Self {
        if !files && !dirs {
            return Self::all();
        }
        Self { files, dirs }
    }

    pub fn all() -> Self {
        Self {
            files: true,
            dirs: true,
        }
    }

    pub fn accepts(&self, kind: EntryKind) -> bool {
        match kind {
            EntryKind::File => self.files,
            EntryKind::Directory => self.dirs,
            EntryKind::Invalid => false,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_selects_both_kinds() {
        let selection = Selection::from_flags(false, false);
        assert!(selection.accepts(EntryKind::File));
        assert!(selection.accepts(EntryKind::Directory));
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn files_flag_excludes_directories() {
        let selection = Selection::from_flags(true, false);
        assert!(selection.accepts(EntryKind::File));
        assert!(!selection.accepts(EntryKind::Directory));
    }

    #[test]
    fn dirs_flag_excludes_files() {
        let selection = Selection::from_flags(false, true);
        assert!(!selection.accepts(EntryKind::File));
        assert!(selection.accepts(EntryKind::Directory));
    }

    #[test]
    fn invalid_entries_are_never_selected() {
        for (files, dirs) in [(false, false), (true, false), (false, true), (true, true)] {
            assert!(!Selection::from_flags(files, dirs).accepts(EntryKind::Invalid));
        }
    }
}
