//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`,
//! serves `static/` locally and prints the URL of each demo.

use std::io;
use std::process::{Command, Stdio};

const PORT: u16 = 8000;

fn main() -> io::Result<()> {
    // Only meaningful on non-wasm targets.
    if cfg!(target_arch = "wasm32") {
        return Ok(());
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Skipping wasm build; the site may serve stale artifacts.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{PORT}");
    println!("  grid demo:     http://127.0.0.1:{PORT}/?demo=grid");
    println!("  feedback demo: http://127.0.0.1:{PORT}/?demo=feedback");
    println!("  options:       width, step, texture=rgba|red, cells=NxM, light=x,y,z, log=level");

    // Blocks until the server exits (Ctrl-C).
    let status = Command::new("python3")
        .args(["-m", "http.server", &PORT.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()?;
    if !status.success() {
        eprintln!("http server exited with {status}");
    }
    Ok(())
}
