#![no_main]
use libfuzzer_sys::fuzz_target;
extern crate pos_det;

use pos_det::settings::parse_settings;
use pos_det::settings::to_document;
use pos_det::settings::Settings;

fuzz_target!(|input: &[u8]| {
    if let Ok(i) = std::str::from_utf8(input) {
        if let Ok(settings) = parse_settings(i, Settings::default()) {
            let document = to_document(&settings);

            let reparsed = parse_settings(&document, Settings::default()).ok();

            assert_eq!(Some(settings), reparsed);
        }
    }
});
