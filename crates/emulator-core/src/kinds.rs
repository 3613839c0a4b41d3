//! The three logical tables the emulator samples from.

/// One of the three record kinds produced per iteration.
///
/// The kinds are structurally independent but handled identically by the
/// emulation loop: one row of each kind is sampled at a shared offset and
/// dispatched to every configured destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Pin events
    Pin,
    /// Geolocation pings
    Geo,
    /// User profile snapshots
    User,
}

impl TableKind {
    /// All kinds, in the order they are sampled each iteration.
    pub const ALL: [TableKind; 3] = [TableKind::Pin, TableKind::Geo, TableKind::User];

    /// Name of the backing table in the relational store.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Pin => "pinterest_data",
            Self::Geo => "geolocation_data",
            Self::User => "user_data",
        }
    }

    /// Short name used for logging and destination-name lookup.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Geo => "geo",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(TableKind::Pin.table_name(), "pinterest_data");
        assert_eq!(TableKind::Geo.table_name(), "geolocation_data");
        assert_eq!(TableKind::User.table_name(), "user_data");
    }

    #[test]
    fn test_display_matches_short_name() {
        for kind in TableKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_sampling_order() {
        assert_eq!(
            TableKind::ALL,
            [TableKind::Pin, TableKind::Geo, TableKind::User]
        );
    }
}
