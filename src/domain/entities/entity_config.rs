//! Declarative entity configuration.

use chrono::{DateTime, Local};

/// Value written into a field at insert time instead of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoFill {
    /// Current local date, ISO `YYYY-MM-DD`.
    CurrentDate,
    /// Current local time, 24-hour `HH:MM`.
    CurrentTime,
}

impl AutoFill {
    /// Formats `now` for this rule.
    #[must_use]
    pub fn render(self, now: &DateTime<Local>) -> String {
        match self {
            Self::CurrentDate => now.format("%Y-%m-%d").to_string(),
            Self::CurrentTime => now.format("%H:%M").to_string(),
        }
    }
}

/// One column of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    auto_fill: Option<AutoFill>,
}

impl Field {
    /// Creates a user-editable field.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            auto_fill: None,
        }
    }

    /// Creates a field filled automatically on insert.
    #[must_use]
    pub const fn auto(name: &'static str, rule: AutoFill) -> Self {
        Self {
            name,
            auto_fill: Some(rule),
        }
    }

    /// Column name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Auto-fill rule, if any.
    #[must_use]
    pub const fn auto_fill(&self) -> Option<AutoFill> {
        self.auto_fill
    }

    /// Whether the user may type into this field.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.auto_fill.is_none()
    }

    /// Human label: `Phone_num` becomes `Phone Num`.
    #[must_use]
    pub fn label(&self) -> String {
        self.name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}

/// Configuration of one CRUD screen: display name, table, fields and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityConfig {
    display_name: &'static str,
    table: &'static str,
    fields: Vec<Field>,
    primary_key: usize,
}

impl EntityConfig {
    /// Creates a configuration keyed by the first field.
    ///
    /// # Panics
    /// Panics if `fields` is empty.
    #[must_use]
    pub fn new(display_name: &'static str, table: &'static str, fields: Vec<Field>) -> Self {
        assert!(!fields.is_empty(), "entity {table} has no fields");
        Self {
            display_name,
            table,
            fields,
            primary_key: 0,
        }
    }

    /// Declares which field is the primary key.
    ///
    /// # Panics
    /// Panics if no field is named `name`.
    #[must_use]
    pub fn with_primary_key(mut self, name: &str) -> Self {
        self.primary_key = self
            .position(name)
            .unwrap_or_else(|| panic!("{name} is not a field of {}", self.table));
        self
    }

    /// Screen/sidebar name, e.g. `Services`.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Database table name, e.g. `Service`.
    #[must_use]
    pub const fn table(&self) -> &'static str {
        self.table
    }

    /// Fields in form/grid/SQL order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Column names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(Field::name)
    }

    /// Index of the primary key field.
    #[must_use]
    pub const fn primary_key_index(&self) -> usize {
        self.primary_key
    }

    /// Primary key field.
    #[must_use]
    pub fn primary_key(&self) -> &Field {
        &self.fields[self.primary_key]
    }

    /// Position of a field by column name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Whether any field is filled automatically.
    #[must_use]
    pub fn has_auto_fields(&self) -> bool {
        self.fields.iter().any(|f| f.auto_fill.is_some())
    }

    /// The six entities of the service business, in sidebar order.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::new(
                "Clients",
                "Client",
                fields(&["SSN", "Fname", "Middle", "Lname", "Address", "Phone_num"]),
            ),
            Self::new(
                "Branches",
                "Branch",
                fields(&["Branchno", "Blocation", "License_no"]),
            ),
            Self::new(
                "Garages",
                "Garage",
                fields(&["Garageno", "Capacity", "Glocation", "Branch_no"]),
            ),
            Self::new(
                "Cars",
                "Car",
                fields(&[
                    "MotorID",
                    "License_no",
                    "Year_Model",
                    "CName",
                    "Shade_num",
                    "Color_name",
                    "Garage_no",
                    "ClientID",
                ]),
            ),
            Self::new(
                "Bookings",
                "Booking",
                vec![
                    Field::new("BookingID"),
                    Field::auto("Booking_Date", AutoFill::CurrentDate),
                    Field::auto("Booking_time", AutoFill::CurrentTime),
                    Field::new("BranchID"),
                    Field::new("ClientID"),
                ],
            ),
            Self::new("Services", "Service", fields(&["ServiceID", "SName", "Cost"])),
        ]
    }

    /// Looks up a catalog entry by display name.
    #[must_use]
    pub fn find(display_name: &str) -> Option<Self> {
        Self::catalog()
            .into_iter()
            .find(|c| c.display_name == display_name)
    }
}

fn fields(names: &[&'static str]) -> Vec<Field> {
    names.iter().copied().map(Field::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_catalog_has_six_entities_in_sidebar_order() {
        let names: Vec<_> = EntityConfig::catalog()
            .iter()
            .map(EntityConfig::display_name)
            .collect();
        assert_eq!(
            names,
            ["Clients", "Branches", "Garages", "Cars", "Bookings", "Services"]
        );
    }

    #[test]
    fn test_primary_key_defaults_to_first_field() {
        for config in EntityConfig::catalog() {
            assert_eq!(config.primary_key_index(), 0);
            assert_eq!(config.primary_key().name(), config.fields()[0].name());
        }
    }

    #[test]
    fn test_declared_primary_key() {
        let config = EntityConfig::find("Cars")
            .unwrap()
            .with_primary_key("License_no");
        assert_eq!(config.primary_key_index(), 1);
        assert_eq!(config.primary_key().name(), "License_no");
    }

    #[test]
    fn test_only_booking_has_auto_fields() {
        let with_auto: Vec<_> = EntityConfig::catalog()
            .into_iter()
            .filter(EntityConfig::has_auto_fields)
            .map(|c| c.table())
            .collect();
        assert_eq!(with_auto, ["Booking"]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Field::new("Phone_num").label(), "Phone Num");
        assert_eq!(Field::new("SSN").label(), "SSN");
        assert_eq!(Field::new("ServiceID").label(), "ServiceID");
        assert_eq!(Field::new("Booking_time").label(), "Booking Time");
    }

    #[test]
    fn test_auto_fill_formats() {
        let now = Local.with_ymd_and_hms(2025, 12, 10, 14, 30, 5).unwrap();
        assert_eq!(AutoFill::CurrentDate.render(&now), "2025-12-10");
        assert_eq!(AutoFill::CurrentTime.render(&now), "14:30");
    }
}
