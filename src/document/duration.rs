//! Animation span estimation from SMIL attributes and CSS animation declarations.

use std::sync::LazyLock;

use regex::Regex;

/// Capture span used when a document declares no finite animation duration.
pub const DEFAULT_DURATION_MS: u64 = 2000;

static SMIL_DUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?:dur|repeatDur)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

static CSS_SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"animation\s*:[^;"}]*?(\d+(?:\.\d+)?)(s|ms)"#).expect("valid regex")
});

static CSS_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"animation-duration\s*:\s*(\d+(?:\.\d+)?)(s|ms)").expect("valid regex")
});

static CLOCK_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(s|ms)?$").expect("valid regex"));

/// Parse a SMIL `dur`/`repeatDur` value into milliseconds.
///
/// `indefinite`, `freeze` and anything unparseable yield `None`. A bare number is seconds.
pub fn parse_dur_value(val: &str) -> Option<f64> {
    let val = val.trim();
    if val == "indefinite" || val == "freeze" {
        return None;
    }
    let caps = CLOCK_VALUE.captures(val)?;
    to_ms(caps.get(1)?.as_str(), caps.get(2).map(|m| m.as_str()))
}

fn to_ms(num: &str, unit: Option<&str>) -> Option<f64> {
    let n: f64 = num.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(match unit {
        Some("ms") => n,
        _ => n * 1000.0,
    })
}

/// Longest finite animation span declared in `svg_text`, in milliseconds.
///
/// Looks at SMIL `dur`/`repeatDur` attributes, the first duration of each CSS `animation`
/// shorthand and every `animation-duration` declaration. Never returns 0: when nothing finite
/// is found the result is [`DEFAULT_DURATION_MS`].
pub fn estimate_duration_ms(svg_text: &str) -> u64 {
    let smil = SMIL_DUR.captures_iter(svg_text).filter_map(|c| {
        let val = c.get(1).or_else(|| c.get(2))?;
        parse_dur_value(val.as_str())
    });

    let css = CSS_SHORTHAND
        .captures_iter(svg_text)
        .chain(CSS_DURATION.captures_iter(svg_text))
        .filter_map(|c| to_ms(c.get(1)?.as_str(), c.get(2).map(|m| m.as_str())));

    let max = smil.chain(css).fold(0.0_f64, f64::max);
    let ms = max.round() as u64;
    if ms == 0 { DEFAULT_DURATION_MS } else { ms }
}
