use std::path::Path;

fn main() {
    let schema_path = Path::new("src/store/migrations/V1__initial_schema.sql");
    if !schema_path.exists() {
        panic!("missing initial migration: {}", schema_path.display());
    }

    println!("cargo:rerun-if-changed=src/store/migrations/V1__initial_schema.sql");

    tauri_build::build()
}
