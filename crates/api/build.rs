//! Build script for the api crate.
//!
//! `sqlx::migrate!` embeds `migrations/` at compile time, but Cargo does not
//! know about that directory. Tell it to rebuild when a migration is added
//! or edited so the binary never ships a stale migration set.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
