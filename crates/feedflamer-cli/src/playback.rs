//! Local playback of the rendered episode.

use std::path::Path;

/// Plays `path` on the default output device until the user presses Enter.
///
/// Runs on a blocking thread; the audio device and stdin are both blocking.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, or no output
/// device is available.
#[cfg(feature = "playback")]
pub(crate) async fn play(path: &Path) -> anyhow::Result<()> {
    use std::io::BufReader;

    use anyhow::Context;

    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let file = std::fs::File::open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        let (_stream, handle) =
            rodio::OutputStream::try_default().context("no audio output device")?;
        let sink = rodio::Sink::try_new(&handle).context("creating audio sink")?;
        let source = rodio::Decoder::new(BufReader::new(file))
            .with_context(|| format!("decoding {}", path.display()))?;
        sink.append(source);

        println!("Playing podcast... Press Enter to stop.");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        sink.stop();
        Ok(())
    })
    .await?
}

/// Built without the `playback` feature: reports where the file is instead.
#[cfg(not(feature = "playback"))]
#[allow(clippy::unused_async)]
pub(crate) async fn play(path: &Path) -> anyhow::Result<()> {
    println!(
        "Playback is not available in this build; open {} in any audio player.",
        path.display()
    );
    Ok(())
}
