#![no_main]

use libfuzzer_sys::fuzz_target;
use pcforge::form::BuildForm;
use pcforge::parsers::build::BuildParser;
use pcforge::slots::ComponentSlot;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let build = BuildParser::new().parse(content);

        assert_eq!(build.len(), ComponentSlot::ALL.len(), "mapping must be total");

        let line_count = content.split('\n').count();
        for mismatch in build.mismatches() {
            assert!(
                mismatch.line_number() >= 1 && mismatch.line_number() <= line_count,
                "mismatch line out of range"
            );
        }

        for (_, entry) in build.entries() {
            assert!(
                entry.is_empty() || entry.price.starts_with('£'),
                "price must carry the currency symbol"
            );
        }

        let mut form = BuildForm::default();
        form.apply(&build);
        assert_eq!(form.rows().len(), ComponentSlot::ALL.len());
    }
});
