// File: crates/plot-core/build.rs
// Summary: Link the Windows system libraries skia-safe's prebuilt binaries expect.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends, used by Skia's font manager and ICU
        println!("cargo:rustc-link-lib=advapi32");
    }
}
