//! # Voxel Sandbox Entry Point
//!
//! Starts the windowed sandbox through the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- [config.json]
//! ```

fn main() {
    voxel_sandbox::run();
}
