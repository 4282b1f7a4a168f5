pub mod logger;
pub(crate) mod time_ranges;
pub(crate) mod url;
