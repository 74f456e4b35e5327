/// Gallery-wide defaults.
/// Durations are expressed in milliseconds unless noted otherwise.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://lemondeenchantier.com/wp-tester/graphql/";
/// Path segment the gallery is mounted under (`/home/...`).
pub const DEFAULT_ROUTE: &str = "home";
/// Delay between two autoplay advances.
pub const AUTOPLAY_INTERVAL_MS: u64 = 4_000;
/// Length of the list/detail fade.
pub const FADE_MS: u32 = 300;
/// CMS bucket for posts without a category; never shown.
pub const UNCATEGORIZED_SLUG: &str = "non-classe";
pub const SLUG_SEPARATOR: char = '-';
/// Widths at or below this are treated as mobile (px).
pub const MOBILE_BREAKPOINT_PX: f64 = 570.0;
