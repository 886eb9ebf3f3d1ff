#![no_main]

use jsontype::Mailbox;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(mailbox) = text.parse::<Mailbox>() {
            let reparsed: Mailbox = mailbox
                .to_string()
                .parse()
                .expect("rendered mailbox must parse");
            assert_eq!(reparsed, mailbox);
        }
    }
});
