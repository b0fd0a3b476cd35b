pub mod conditions;
pub mod geoip;
