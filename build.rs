fn main() {
    // sqlx::migrate!() embeds the SQL files at compile time, so a changed
    // migration must trigger a rebuild even when no Rust source changed
    println!("cargo:rerun-if-changed=migrations");

    // Also rerun if the build script itself changes
    println!("cargo:rerun-if-changed=build.rs");
}
