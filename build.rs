fn main() {
    // mdbtools ships the Access driver as libmdbsql; pkg-config also emits glib's link flags.
    pkg_config::probe_library("libmdbsql").unwrap_or_else(|e| panic!("{}", e));
    println!("cargo:rerun-if-changed=build.rs");
}
