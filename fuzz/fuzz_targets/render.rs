#![no_main]

use libfuzzer_sys::fuzz_target;

use mathmark::{try_render, Error, Options, Plugins};

fuzz_target!(|s: &str| {
    if let Err(Error::UnusedPlaceholder(ix)) = try_render(s, &Options::default(), &Plugins::default()) {
        panic!("placeholder {} leaked for input {:?}", ix, s);
    }
});
