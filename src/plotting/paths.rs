use std::path::{Path, PathBuf};
use crate::plotting::PlotError;
/// Directory every batch figure lands under unless the caller picks another base.
pub const DEFAULT_FIGURES_DIR: &str = "figures";
/// Labels end up inside a single file name, so they may not be empty, contain a
/// path separator or NUL, or be `.`/`..`.
pub fn check_file_label(label: &str) -> Result<(), PlotError> {
    let bad = label.is_empty()
        || label == "."
        || label == ".."
        || label.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if bad {
        return Err(PlotError::InvalidFileLabel(label.to_owned()));
    }
    Ok(())
}
/// `target/signal_target_{label}.png`
pub fn target_overview(base: &Path, label: &str) -> PathBuf {
    base.join("target").join(format!("signal_target_{label}.png"))
}
/// `frequential/signal_freq_{index}.png`
pub fn channel_spectrum(base: &Path, index: usize) -> PathBuf {
    base.join("frequential")
        .join(format!("signal_freq_{index}.png"))
}
/// `frequential/signal_freq_w_{label}_comparison.png`
pub fn spectrum_comparison(base: &Path, label: &str) -> PathBuf {
    base.join("frequential")
        .join(format!("signal_freq_w_{label}_comparison.png"))
}
/// `delay/delay_nofilter_{index}.png`
pub fn event_window(base: &Path, index: usize) -> PathBuf {
    base.join("delay")
        .join(format!("delay_nofilter_{index}.png"))
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn labels_stay_inside_their_directory() {
        assert!(check_file_label("Fp1").is_ok());
        assert!(check_file_label("run..2").is_ok());
        for bad in ["", ".", "..", "../escape", "a/b", "a\\b", "nul\0"] {
            assert!(
                matches!(check_file_label(bad), Err(PlotError::InvalidFileLabel(_))),
                "{bad:?}"
            );
        }
    }
    #[test]
    fn templates_under_default_dir() {
        let base = Path::new(DEFAULT_FIGURES_DIR);
        assert_eq!(
            target_overview(base, "rest"),
            PathBuf::from("figures/target/signal_target_rest.png")
        );
        assert_eq!(
            channel_spectrum(base, 3),
            PathBuf::from("figures/frequential/signal_freq_3.png")
        );
        assert_eq!(
            spectrum_comparison(base, "Fp1"),
            PathBuf::from("figures/frequential/signal_freq_w_Fp1_comparison.png")
        );
        assert_eq!(
            event_window(base, 6010),
            PathBuf::from("figures/delay/delay_nofilter_6010.png")
        );
    }
}
