#![no_main]

use jsontype::codec::{format_duration, parse_duration};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Anything that parses must survive a format/parse cycle unchanged.
        if let Ok(d) = parse_duration(text) {
            let rendered = format_duration(d);
            assert_eq!(parse_duration(&rendered), Ok(d), "{rendered}");
        }
    }
});
