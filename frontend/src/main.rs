//! Entry point for the WASM application

pub fn main() {
    pdfvault_frontend::start();
}
