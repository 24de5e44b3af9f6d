use std::io::{self, Write};

/// User-visible surface for the running log. Gets every entry as it is
/// recorded and a clear signal when the log is reset.
pub trait DisplaySink {
    fn push(&mut self, entry: &str);
    fn clear(&mut self);
}

/// Shows entries on stdout. Entries carry their own framing newlines, so
/// they are written verbatim.
pub struct Console;

impl DisplaySink for Console {
    fn push(&mut self, entry: &str) {
        print!("{entry}");
        let _ = io::stdout().flush();
    }

    fn clear(&mut self) {
        // A terminal can't un-print history; mark the reset instead.
        println!("-- log cleared --");
    }
}

/// Discards everything, for headless one-shot commands.
#[derive(Default)]
pub struct Silent;

impl DisplaySink for Silent {
    fn push(&mut self, _entry: &str) {}

    fn clear(&mut self) {}
}
