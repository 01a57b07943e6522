//! Domain entity definitions.

mod entity_config;
mod record;
mod statement;

pub use entity_config::{AutoFill, EntityConfig, Field};
pub use record::{CellValue, Record};
pub use statement::{COUNT_ALIAS, Statement, StatementKind};
