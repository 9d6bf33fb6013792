pub mod configuration;
pub mod http_client;
pub mod ids;
pub mod nz_date_time;
pub mod tracing;
