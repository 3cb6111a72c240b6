//! Tiny tone synthesizer: note tables in, mono PCM samples out.

/// Sample rate for everything we generate.
pub const SAMPLE_RATE: u32 = 22_050;

/// Seconds of fade at each note edge, to avoid clicks.
const FADE_SECS: f32 = 0.01;

/// One note: frequency in Hz and duration in seconds.
pub type Note = (f32, f32);

/// Render a note sequence as mono f32 samples at [`SAMPLE_RATE`].
/// Each note is a sine at `amplitude` with a short linear fade in and
/// out.
pub fn tone_sequence(notes: &[Note], amplitude: f32) -> Vec<f32> {
    let total_secs: f32 = notes.iter().map(|&(_, duration)| duration).sum();
    let mut samples = Vec::with_capacity((total_secs * SAMPLE_RATE as f32) as usize + 1);

    let fade_frames = (FADE_SECS * SAMPLE_RATE as f32).max(1.0);
    for &(frequency, duration) in notes {
        let frames = (duration * SAMPLE_RATE as f32) as usize;
        for i in 0..frames {
            let t = i as f32 / SAMPLE_RATE as f32;
            let fade = (i as f32 / fade_frames)
                .min((frames - i) as f32 / fade_frames)
                .min(1.0);
            let value = fade * amplitude * (std::f32::consts::TAU * frequency * t).sin();
            samples.push(value);
        }
    }

    samples
}
