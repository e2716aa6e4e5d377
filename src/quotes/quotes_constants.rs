pub const APILAYER_BASE_URL: &str = "http://apilayer.net/api";
pub const APILAYER_LIVE_ENDPOINT: &str = "live";
pub const APILAYER_FORMAT_TYPE: &str = "1";
