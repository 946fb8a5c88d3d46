#![no_main]

use libfuzzer_sys::fuzz_target;
use winmdgen::{metadata::winmd::WinMd, generator::find_class};

fuzz_target!(|data: &[u8]| {
    if let Ok(winmd) = WinMd::from_mem("fuzz.winmd", data.to_vec()) {
        let _ = find_class(&winmd, "Windows.Foundation.Uri");
    }
});
