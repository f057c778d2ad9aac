#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must fail cleanly, never panic.
    if let Ok(module) = modvault_format::load(data) {
        let _ = module.instruments();
        if module.as_protracker().is_some() {
            let _ = modvault_format::export(&module);
        }
    }
});
