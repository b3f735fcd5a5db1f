use utfx::{transcode, TranscodeError, USAGE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let argv = std::env::args_os().skip(1).collect();
    let results = transcode(argv, &mut std::io::stdout().lock());
    if let Err(error) = &results {
        if matches!(error.downcast_ref::<TranscodeError>(), Some(TranscodeError::Usage)) {
            eprintln!("Usage: {USAGE}");
        }
    }
    results
}
