//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves the demo page in `static/` on http://127.0.0.1:8000.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::{Command, ExitCode};

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Install it from https://rustwasm.github.io/wasm-pack/.");
            return ExitCode::FAILURE;
        }
    }

    println!("Serving static/ at http://127.0.0.1:8000 (Ctrl-C to stop) …");
    match Command::new("python3")
        .args(["-m", "http.server", "8000", "--directory", "static"])
        .status()
    {
        Ok(st) if st.success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
