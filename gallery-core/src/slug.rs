//! Slugs derived from titles and the gallery's deep-link paths.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Build a URL-safe slug from a title.
///
/// The result only contains `[a-z0-9]` runs joined by single `separator`s,
/// so applying `slugify` to its own output returns it unchanged.
pub fn slugify(title: &str, separator: char) -> String {
    let lowered = title.trim().to_lowercase();
    let mut mapped = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match c {
            'œ' => mapped.push_str("oe"),
            'æ' => mapped.push_str("ae"),
            'ß' => mapped.push_str("ss"),
            'ø' => mapped.push('o'),
            'đ' => mapped.push('d'),
            'ł' => mapped.push('l'),
            '·' | '/' | '_' | ',' | ':' | ';' => mapped.push('-'),
            _ => mapped.push(c),
        }
    }

    let mut out = String::with_capacity(mapped.len());
    let mut pending_separator = false;
    for c in mapped.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.push(c);
        } else if c == '-' || c == separator || c.is_whitespace() {
            pending_separator = true;
        }
    }
    out
}

/// Category and sculpture slugs carried by a gallery path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryPath {
    pub category_slug: Option<String>,
    pub sculpture_slug: Option<String>,
}

/// Split a location path into its gallery slugs.
///
/// Empty segments and the default route marker are skipped; query strings and
/// fragments are ignored.
pub fn parse_path(path: &str, default_route: &str) -> GalleryPath {
    let marker = default_route.trim_matches('/');
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .filter(|s| s != marker);
    GalleryPath {
        category_slug: segments.next(),
        sculpture_slug: segments.next(),
    }
}

/// Inverse of [`parse_path`] for slugs produced by [`slugify`].
pub fn gallery_path(default_route: &str, category_slug: &str, sculpture_slug: Option<&str>) -> String {
    let marker = default_route.trim_matches('/');
    match sculpture_slug {
        Some(s) => format!("/{marker}/{category_slug}/{s}"),
        None => format!("/{marker}/{category_slug}"),
    }
}

fn decode_segment(segment: &str) -> String {
    percent_encoding::percent_decode_str(segment)
        .decode_utf8_lossy()
        .to_string()
}

/// Decode the HTML entities the CMS leaves in rendered titles
/// (`L&#8217;oiseau`, `Fer &amp; bois`). Unknown entities are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(end) = tail.find(';').filter(|&end| end > 1 && end <= 10)
            && let Some(decoded) = decode_entity(&tail[1..end])
        {
            out.push(decoded);
            rest = &tail[end + 1..];
            continue;
        }
        out.push('&');
        rest = &tail[1..];
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "times" => '\u{d7}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_punctuation() {
        assert_eq!(slugify("Crème au chocolat", '-'), "creme-au-chocolat");
        assert_eq!(slugify("  L'Oiseau de feu ", '-'), "loiseau-de-feu");
        assert_eq!(slugify("Série: Métal/Bois", '-'), "serie-metal-bois");
        assert_eq!(slugify("Cœur d'acier", '-'), "coeur-dacier");
        assert_eq!(slugify("Ñandú   Çà", '-'), "nandu-ca");
    }

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(slugify("--Red -- Bird--", '-'), "red-bird");
        assert_eq!(slugify("a_b,c;d", '-'), "a-b-c-d");
        assert_eq!(slugify("", '-'), "");
        assert_eq!(slugify("!!!", '-'), "");
    }

    #[test]
    fn custom_separator() {
        assert_eq!(slugify("Red Bird 2", '_'), "red_bird_2");
        assert_eq!(slugify("red_bird_2", '_'), "red_bird_2");
    }

    #[test]
    fn parse_path_skips_marker_and_empty_segments() {
        let p = parse_path("/home/metal-works/red-bird", "home");
        assert_eq!(p.category_slug.as_deref(), Some("metal-works"));
        assert_eq!(p.sculpture_slug.as_deref(), Some("red-bird"));

        let p = parse_path("//home//metal-works/", "home");
        assert_eq!(p.category_slug.as_deref(), Some("metal-works"));
        assert_eq!(p.sculpture_slug, None);

        assert_eq!(parse_path("/", "home"), GalleryPath::default());
        assert_eq!(parse_path("/home", "/home/"), GalleryPath::default());
    }

    #[test]
    fn parse_path_decodes_and_ignores_query() {
        let p = parse_path("/home/m%C3%A9tal?x=1#top", "home");
        assert_eq!(p.category_slug.as_deref(), Some("métal"));
        assert_eq!(p.sculpture_slug, None);
    }

    #[test]
    fn gallery_path_round_trips_through_parse() {
        let path = gallery_path("home", "metal-works", Some("red-bird"));
        assert_eq!(path, "/home/metal-works/red-bird");
        let parsed = parse_path(&path, "home");
        assert_eq!(parsed.category_slug.as_deref(), Some("metal-works"));
        assert_eq!(parsed.sculpture_slug.as_deref(), Some("red-bird"));
        assert_eq!(gallery_path("/home/", "wood", None), "/home/wood");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(decode_entities("L&#8217;oiseau"), "L\u{2019}oiseau");
        assert_eq!(decode_entities("Fer &amp; bois"), "Fer & bois");
        assert_eq!(decode_entities("&#x41;&#X42;"), "AB");
        assert_eq!(decode_entities("A & B &bogus; &"), "A & B &bogus; &");
        assert_eq!(decode_entities("&;"), "&;");
    }
}
