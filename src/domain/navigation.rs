//! Pages of the authenticated shell.

/// Page selected in the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Tasks,
    Schedule,
    Achievements,
}

impl Page {
    /// Navbar order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Tasks, Self::Schedule, Self::Achievements];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Tasks => "Tasks",
            Self::Schedule => "Calendar",
            Self::Achievements => "Achievements",
        }
    }

    /// Header subtitle.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Home => "Overview and quick add.",
            Self::Tasks => "List, complete and edit routines.",
            Self::Schedule => "Tasks by the day they were created.",
            Self::Achievements => "Progress and completed routines.",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Home => "⌂",
            Self::Tasks => "☰",
            Self::Schedule => "▦",
            Self::Achievements => "★",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Tasks => 1,
            Self::Schedule => 2,
            Self::Achievements => 3,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_home() {
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Page::Achievements.next(), Page::Home);
        assert_eq!(Page::Home.previous(), Page::Achievements);
        assert_eq!(Page::Tasks.next(), Page::Schedule);
    }

    #[test]
    fn test_index_roundtrip() {
        for page in Page::ALL {
            assert_eq!(Page::ALL[page.index()], page);
        }
    }
}
