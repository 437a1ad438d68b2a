use regex::{Captures, Match, Regex};

use super::{StructuralGuess, StructuralGuesser};
use crate::error::{Result, ShirabeError};

/// Whole-word language tokens seen in release names and the code each maps to.
const LANGUAGE_TOKENS: &[(&str, &str)] = &[
    ("hindi", "hi"),
    ("hin", "hi"),
    ("tamil", "ta"),
    ("tam", "ta"),
    ("telugu", "te"),
    ("tel", "te"),
    ("malayalam", "ml"),
    ("mal", "ml"),
    ("kannada", "kn"),
    ("kan", "kn"),
    ("marathi", "mr"),
    ("gujarati", "gu"),
    ("english", "en"),
    ("eng", "en"),
    ("japanese", "ja"),
    ("jap", "ja"),
    ("jpn", "ja"),
    ("korean", "ko"),
    ("kor", "ko"),
    ("spanish", "es"),
    ("spa", "es"),
    ("french", "fr"),
    ("fre", "fr"),
    ("russian", "ru"),
    ("rus", "ru"),
    ("chinese", "zh"),
    ("mandarin", "zh"),
    ("thai", "th"),
    ("vietnamese", "vi"),
    ("indonesian", "in"),
];

/// Heuristic guesser using regex patterns and scene naming rules.
///
/// The title is the first non-empty text region left after every metadata
/// token (year, screen size, codecs, source, season/episode markers,
/// languages) has been cut out.
pub struct HeuristicGuesser {
    re_extension: Regex,
    re_screen_size: Regex,
    re_year: Regex,
    re_vcodec: Regex,
    re_acodec: Regex,
    re_source: Regex,
    re_episode: Regex,
    re_language: Regex,
}

impl HeuristicGuesser {
    /// Constructs a new `HeuristicGuesser` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ShirabeError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        let languages = LANGUAGE_TOKENS
            .iter()
            .map(|(token, _)| *token)
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            re_extension: Regex::new(
                r"(?i)[.\s](?:mkv|mp4|avi|webm|mov|m4v|wmv|flv|mpe?g|ts)$",
            )?,
            re_screen_size: Regex::new(
                r"(?i)\b(?:(4320|2160|1440|1080|720|576|480|360)([pi])|(4k|uhd))\b",
            )?,
            re_year: Regex::new(r"\b((?:19|20)\d{2})\b")?,
            re_vcodec: Regex::new(
                r"(?i)\b(x\.?264|x\.?265|h\.?264|h\.?265|hevc|avc|av1|vp9|xvid|10bit|hdr(?:10)?)\b",
            )?,
            re_acodec: Regex::new(
                r"(?i)\b(flac|aac(?:2\.0)?|opus|ac3|e-?ac3|ddp?(?:5\.1|2\.0)?|dts(?:-?hd)?|truehd|atmos|mp3)\b",
            )?,
            re_source: Regex::new(
                r"(?i)\b(blu-?ray(?:\s*remux)?|bdremux|bd-?rip|brrip|web-?dl|web-?rip|hdtv|hdrip|dvd(?:rip|scr)?|hdcam|camrip|pre-?dvd)\b",
            )?,
            re_episode: Regex::new(
                r"(?i)\b(?:s\d{1,2}\s?e\d{1,4}|s\d{1,2}|season\s*\d{1,2}|episode\s*\d{1,4}|ep?\d{1,4})\b|\s-\s\d{1,4}\b",
            )?,
            re_language: Regex::new(&format!(r"(?i)\b({languages})\b"))?,
        })
    }

    /// Parses a cleaned filename into a structural guess.
    ///
    /// # Errors
    ///
    /// Returns `ShirabeError::EmptyInput` if the input is empty or whitespace-only.
    pub fn parse(&self, input: &str) -> Result<StructuralGuess> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ShirabeError::EmptyInput);
        }

        let work = self.re_extension.replace(trimmed, "").into_owned();

        let screen_size = self.extract_screen_size(&work);
        let languages = self.extract_languages(&work);
        let year = self.select_year(&work, self.metadata_start(&work));
        let title = self.extract_title(&work, year.map(|(start, end, _)| (start, end)));

        Ok(StructuralGuess {
            title,
            year: year.map(|(_, _, y)| y),
            languages,
            screen_size,
        })
    }

    fn metadata_patterns(&self) -> [&Regex; 6] {
        [
            &self.re_screen_size,
            &self.re_vcodec,
            &self.re_acodec,
            &self.re_source,
            &self.re_episode,
            &self.re_language,
        ]
    }

    fn extract_screen_size(&self, input: &str) -> Option<String> {
        self.re_screen_size.captures(input).map(|c| {
            if c.get(3).is_some() {
                "2160p".to_string()
            } else {
                format!("{}{}", &c[1], c[2].to_lowercase())
            }
        })
    }

    fn extract_languages(&self, input: &str) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for caps in self.re_language.captures_iter(input) {
            if caps.get(0).is_some_and(|m| m.start() == 0) {
                continue;
            }
            let token = caps[1].to_lowercase();
            let code = LANGUAGE_TOKENS
                .iter()
                .find(|(t, _)| *t == token)
                .map(|(_, code)| (*code).to_string());
            if let Some(code) = code {
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
        }
        codes
    }

    /// Byte offset of the first metadata token that is not at the very start.
    fn metadata_start(&self, input: &str) -> usize {
        self.metadata_patterns()
            .iter()
            .filter_map(|re| re.find_iter(input).map(|m| m.start()).find(|&s| s > 0))
            .min()
            .unwrap_or(input.len())
    }

    /// Picks the release year: the last plausible year before the metadata
    /// block, else the first one anywhere. A year opening the name is part of
    /// the title ("2012", "1917").
    fn select_year(&self, input: &str, meta_start: usize) -> Option<(usize, usize, u16)> {
        let candidates: Vec<(usize, usize, u16)> = self
            .re_year
            .find_iter(input)
            .filter(|m| m.start() > 0)
            .filter_map(|m: Match<'_>| {
                let year: u16 = m.as_str().parse().ok()?;
                (1900..=2099)
                    .contains(&year)
                    .then_some((m.start(), m.end(), year))
            })
            .collect();

        candidates
            .iter()
            .rev()
            .find(|(start, _, _)| *start < meta_start)
            .or_else(|| candidates.first())
            .copied()
    }

    fn extract_title(&self, input: &str, year_span: Option<(usize, usize)>) -> Option<String> {
        let mut work = input.to_string();
        if let Some((start, end)) = year_span {
            work.replace_range(start..end, "\x00");
        }

        for pattern in [
            &self.re_screen_size,
            &self.re_vcodec,
            &self.re_acodec,
            &self.re_source,
            &self.re_episode,
        ] {
            work = pattern.replace_all(&work, "\x00").into_owned();
        }

        // A language word opening the name is a title word ("Hindi Medium").
        work = self
            .re_language
            .replace_all(&work, |caps: &Captures<'_>| match caps.get(0) {
                Some(m) if m.start() == 0 => m.as_str().to_string(),
                _ => "\x00".to_string(),
            })
            .into_owned();

        work.split('\x00')
            .map(clean_title_region)
            .find(|t| !t.is_empty())
    }
}

fn clean_title_region(region: &str) -> String {
    region
        .replace(['.', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '-' | ' ' | '(' | ')' | '[' | ']' | '{' | '}' | ',' | '+'))
        .to_string()
}

impl StructuralGuesser for HeuristicGuesser {
    fn guess(&self, cleaned: &str) -> Result<StructuralGuess> {
        self.parse(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guesser() -> HeuristicGuesser {
        HeuristicGuesser::new().unwrap()
    }

    #[test]
    fn empty_input_errors() {
        let g = guesser();
        assert!(matches!(g.parse(""), Err(ShirabeError::EmptyInput)));
        assert!(matches!(g.parse("   "), Err(ShirabeError::EmptyInput)));
    }

    #[test]
    fn scene_movie_name() {
        let r = guesser().parse("Inception 2010 1080p BluRay x264 mkv").unwrap();
        assert_eq!(r.title.as_deref(), Some("Inception"));
        assert_eq!(r.year, Some(2010));
        assert_eq!(r.screen_size.as_deref(), Some("1080p"));
        assert!(r.languages.is_empty());
    }

    #[test]
    fn year_inside_title_is_kept() {
        let g = guesser();

        let r = g.parse("Blade Runner 2049 2017 2160p WEB-DL").unwrap();
        assert_eq!(r.title.as_deref(), Some("Blade Runner 2049"));
        assert_eq!(r.year, Some(2017));
        assert_eq!(r.screen_size.as_deref(), Some("2160p"));

        let r = g.parse("2012 2009 720p").unwrap();
        assert_eq!(r.title.as_deref(), Some("2012"));
        assert_eq!(r.year, Some(2009));
    }

    #[test]
    fn parenthesised_year() {
        let r = guesser().parse("Parasite (2019) 1080p").unwrap();
        assert_eq!(r.title.as_deref(), Some("Parasite"));
        assert_eq!(r.year, Some(2019));
    }

    #[test]
    fn episodic_names() {
        let g = guesser();

        let r = g.parse("The Office S01E01 720p WEBRip").unwrap();
        assert_eq!(r.title.as_deref(), Some("The Office"));
        assert_eq!(r.year, None);
        assert_eq!(r.screen_size.as_deref(), Some("720p"));

        let r = g.parse("Jujutsu Kaisen - 24 (1080p).mkv").unwrap();
        assert_eq!(r.title.as_deref(), Some("Jujutsu Kaisen"));
        assert_eq!(r.screen_size.as_deref(), Some("1080p"));
    }

    #[test]
    fn language_codes_in_order() {
        let r = guesser().parse("Jawan 2023 Hindi Tamil Hin 1080p").unwrap();
        assert_eq!(r.title.as_deref(), Some("Jawan"));
        assert_eq!(r.languages, vec!["hi".to_string(), "ta".to_string()]);
    }

    #[test]
    fn leading_language_word_stays_in_title() {
        let g = guesser();

        let r = g.parse("Hindi Medium 2017 1080p").unwrap();
        assert_eq!(r.title.as_deref(), Some("Hindi Medium"));
        assert_eq!(r.year, Some(2017));
        assert!(r.languages.is_empty());

        let r = g.parse("English Vinglish 2012 720p").unwrap();
        assert_eq!(r.title.as_deref(), Some("English Vinglish"));
        assert_eq!(r.year, Some(2012));

        let r = g.parse("Mal 2019 1080p").unwrap();
        assert_eq!(r.title.as_deref(), Some("Mal"));
        assert_eq!(r.year, Some(2019));
    }

    #[test]
    fn trailing_language_word_is_still_cut() {
        let r = guesser().parse("Hindi Medium 2017 Hindi 1080p").unwrap();
        assert_eq!(r.title.as_deref(), Some("Hindi Medium"));
        assert_eq!(r.languages, vec!["hi".to_string()]);
    }

    #[test]
    fn four_k_token() {
        let r = guesser().parse("Dune Part Two 2024 4K HDR").unwrap();
        assert_eq!(r.title.as_deref(), Some("Dune Part Two"));
        assert_eq!(r.screen_size.as_deref(), Some("2160p"));
    }

    #[test]
    fn leading_metadata_is_skipped() {
        let r = guesser().parse("1080p Movie Name 2019").unwrap();
        assert_eq!(r.title.as_deref(), Some("Movie Name"));
        assert_eq!(r.year, Some(2019));
    }

    #[test]
    fn metadata_only_has_no_title() {
        let r = guesser().parse("1080p x264").unwrap();
        assert!(!r.has_title());
        assert_eq!(r.screen_size.as_deref(), Some("1080p"));
    }

    #[test]
    fn guess_is_serializable() {
        let r = guesser().parse("Spirited Away 2001 720p").unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: StructuralGuess = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
