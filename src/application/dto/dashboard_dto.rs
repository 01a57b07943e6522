//! Dashboard card definitions.

/// One aggregate-count card: title and the table it counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    /// Card heading.
    pub title: &'static str,
    /// Table whose rows are counted.
    pub table: &'static str,
}

/// The four dashboard cards, left to right.
pub const DASHBOARD_CARDS: [CardSpec; 4] = [
    CardSpec {
        title: "Total Clients",
        table: "Client",
    },
    CardSpec {
        title: "Total Branches",
        table: "Branch",
    },
    CardSpec {
        title: "Active Bookings",
        table: "Booking",
    },
    CardSpec {
        title: "Available Cars",
        table: "Car",
    },
];

/// A card with its resolved count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    /// Card heading.
    pub title: &'static str,
    /// Row count, `0` when the query failed or returned nothing.
    pub count: i64,
}
