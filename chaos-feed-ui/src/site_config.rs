//! Backend settings compiled into the page
//!
//! Overwritten by `chaos-feed generate-config`. The placeholders keep the
//! feed disabled until real values are generated.

pub const SUPABASE_URL: &str = "YOUR_SUPABASE_URL";
pub const SUPABASE_ANON_KEY: &str = "YOUR_SUPABASE_ANON_KEY";
