//! Unit tests for framebuffer config selection

use super::most_samples;

#[test]
fn test_most_samples_picks_highest() {
    let configs = vec![("a", 0u8), ("b", 4), ("c", 2)];
    let best = most_samples(configs.into_iter(), |config| config.1);
    assert_eq!(best, Some(("b", 4)));
}

#[test]
fn test_most_samples_keeps_first_on_tie() {
    let configs = vec![("a", 4u8), ("b", 4)];
    assert_eq!(most_samples(configs.into_iter(), |config| config.1), Some(("a", 4)));
}

#[test]
fn test_most_samples_empty_set_is_none() {
    let configs: Vec<(&str, u8)> = Vec::new();
    assert_eq!(most_samples(configs.into_iter(), |config| config.1), None);
}
