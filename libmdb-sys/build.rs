use std::env;
use std::path::PathBuf;

fn main() {
    let library = pkg_config::probe_library("libmdbsql").unwrap_or_else(|e| panic!("{}", e));

    // Only the open/query/fetch surface of libmdbsql is bound.
    let bindings = bindgen::Builder::default()
        .clang_args(
            library
                .include_paths
                .iter()
                .map(|path| format!("-I{}", path.to_string_lossy())),
        )
        .clang_arg("-D HAVE_GLIB=1")
        .header("src/wrapper.h")
        .allowlist_function("mdb_open")
        .allowlist_function("mdb_sql_.*")
        .allowlist_type("MdbSQL")
        .allowlist_type("MdbSQLColumn")
        .allowlist_type("MdbFileFlags")
        .blocklist_type("_?GPtrArray")
        .raw_line("use glib_sys::GPtrArray;")
        .parse_callbacks(Box::new(bindgen::CargoCallbacks))
        .rustfmt_bindings(true)
        .trust_clang_mangling(false)
        .generate()
        .expect("Unable to generate libmdbsql bindings");

    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    bindings
        .write_to_file(out_path.join("bindings.rs"))
        .expect("Couldn't write bindings!");
}
