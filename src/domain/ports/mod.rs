mod alert_port;
mod database_port;

pub use alert_port::AlertPort;
pub use database_port::DatabasePort;

#[cfg(test)]
pub use alert_port::MockAlertPort;
