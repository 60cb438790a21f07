//! Caption track selection.
//!
//! Tracks are matched against a fixed priority table. The first rule with a
//! match wins; within a rule, languages are tried in list order. When nothing
//! matches, the first listed track is used. That last step follows the
//! provider's enumeration order and is best-effort only.

use log::debug;

use crate::youtube::{CaptionTrack, TrackKind};

pub const PRIMARY_LANGUAGES: &[&str] = &["en"];
pub const SECONDARY_LANGUAGES: &[&str] = &["en-US", "en-GB", "es", "fr", "de"];

/// One row of the priority table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: TrackKind,
    pub languages: &'static [&'static str],
}

pub const PRIORITY: [Rule; 4] = [
    Rule {
        kind: TrackKind::Manual,
        languages: PRIMARY_LANGUAGES,
    },
    Rule {
        kind: TrackKind::Manual,
        languages: SECONDARY_LANGUAGES,
    },
    Rule {
        kind: TrackKind::Generated,
        languages: PRIMARY_LANGUAGES,
    },
    Rule {
        kind: TrackKind::Generated,
        languages: SECONDARY_LANGUAGES,
    },
];

/// Find a track of the given kind, trying languages in order
pub fn find_track<'a>(tracks: &'a [CaptionTrack], kind: TrackKind, languages: &[&str]) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        tracks
            .iter()
            .find(|t| t.kind == kind && t.language_code == *lang)
    })
}

/// Pick the best track, or `None` when the set is empty
pub fn select_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    for (step, rule) in PRIORITY.iter().enumerate() {
        if let Some(track) = find_track(tracks, rule.kind, rule.languages) {
            debug!("Selected {} track {} by rule {}", track.kind, track.language_code, step + 1);
            return Some(track);
        }
    }

    let fallback = tracks.first();
    if let Some(track) = fallback {
        debug!("No preferred track, falling back to first listed: {} {}", track.kind, track.language_code);
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(lang: &str) -> CaptionTrack {
        track(lang, TrackKind::Manual)
    }

    fn generated(lang: &str) -> CaptionTrack {
        track(lang, TrackKind::Generated)
    }

    fn track(lang: &str, kind: TrackKind) -> CaptionTrack {
        CaptionTrack {
            language_code: lang.to_string(),
            kind,
            base_url: format!("https://captions.test/{kind}/{lang}"),
        }
    }

    fn selected(tracks: &[CaptionTrack]) -> Option<(String, TrackKind)> {
        select_track(tracks).map(|t| (t.language_code.clone(), t.kind))
    }

    #[test]
    fn test_manual_primary_first() {
        let tracks = vec![generated("en"), manual("es"), manual("en")];
        assert_eq!(selected(&tracks), Some(("en".to_string(), TrackKind::Manual)));
    }

    #[test]
    fn test_manual_secondary_before_generated_primary() {
        let tracks = vec![manual("es"), generated("en")];
        assert_eq!(selected(&tracks), Some(("es".to_string(), TrackKind::Manual)));
    }

    #[test]
    fn test_secondary_list_order_not_track_order() {
        let tracks = vec![manual("de"), manual("fr"), manual("en-GB")];
        assert_eq!(selected(&tracks), Some(("en-GB".to_string(), TrackKind::Manual)));
    }

    #[test]
    fn test_generated_primary() {
        let tracks = vec![manual("ja"), generated("fr"), generated("en")];
        assert_eq!(selected(&tracks), Some(("en".to_string(), TrackKind::Generated)));
    }

    #[test]
    fn test_generated_secondary() {
        let tracks = vec![manual("ja"), generated("ko"), generated("de"), generated("es")];
        assert_eq!(selected(&tracks), Some(("es".to_string(), TrackKind::Generated)));
    }

    #[test]
    fn test_fallback_first_listed() {
        let tracks = vec![generated("ko"), manual("ja")];
        assert_eq!(selected(&tracks), Some(("ko".to_string(), TrackKind::Generated)));
    }

    #[test]
    fn test_manual_fr_over_generated_en() {
        let tracks = vec![generated("en"), manual("fr")];
        assert_eq!(selected(&tracks), Some(("fr".to_string(), TrackKind::Manual)));
    }

    #[test]
    fn test_language_match_is_exact() {
        // "en-us" is not "en-US"; nothing in the table matches
        let tracks = vec![manual("en-us"), generated("pt")];
        assert_eq!(selected(&tracks), Some(("en-us".to_string(), TrackKind::Manual)));
    }

    #[test]
    fn test_empty_set() {
        assert_eq!(select_track(&[]), None);
    }

    #[test]
    fn test_find_track_respects_kind() {
        let tracks = vec![generated("en")];
        assert!(find_track(&tracks, TrackKind::Manual, PRIMARY_LANGUAGES).is_none());
        assert!(find_track(&tracks, TrackKind::Generated, PRIMARY_LANGUAGES).is_some());
    }
}
