use std::process;

use topqual::topreads::topreads_run;

fn main() {
    if let Err(e) = topreads_run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
