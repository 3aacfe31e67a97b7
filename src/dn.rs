//! Subject distinguished name handling.
//!
//! Renders an X.509 subject as an RFC 2253 string and finds the Common Name
//! inside that string. Rendering and lookup are deliberately separate steps:
//! the identity a session yields is defined by the textual form of the DN,
//! so the lookup stays a plain string scan over `key=value` segments.

use x509_parser::x509::X509Name;

// ─────────────────────────────────────────────────────────────────────────────
// RFC 2253 rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render a subject DN as an RFC 2253 string,
/// e.g. `CN=Steve Kille,O=Isode Limited,C=GB`.
///
/// RDNs print in reverse of their DER order (RFC 2253 section 2.1), so the
/// most specific attribute comes first. Multi-valued RDNs are joined with
/// `+`. The special characters `, + " \ < > ;` and leading `#` or spaces at
/// either end of a value are escaped with a backslash (section 2.4).
/// Attribute types outside the section 2.3 keyword table print as
/// dotted-decimal OIDs. Attribute values with no string representation are
/// skipped.
#[must_use]
pub fn format_rfc2253(name: &X509Name<'_>) -> String {
    let mut rdns: Vec<String> = name
        .iter()
        .map(|rdn| {
            rdn.iter()
                .filter_map(|attr| {
                    let value = attr.attr_value().as_str().ok()?;
                    let dotted = attr.attr_type().to_string();
                    let key: &str = type_keyword(&dotted).unwrap_or(&dotted);
                    Some(format!("{key}={}", escape_value(value)))
                })
                .collect::<Vec<_>>()
                .join("+")
        })
        .filter(|rdn| !rdn.is_empty())
        .collect();

    rdns.reverse();
    rdns.join(",")
}

/// RFC 2253 section 2.3 keyword for an attribute type, if it has one.
fn type_keyword(dotted_oid: &str) -> Option<&'static str> {
    match dotted_oid {
        "2.5.4.3" => Some("CN"),
        "2.5.4.6" => Some("C"),
        "2.5.4.7" => Some("L"),
        "2.5.4.8" => Some("ST"),
        "2.5.4.9" => Some("STREET"),
        "2.5.4.10" => Some("O"),
        "2.5.4.11" => Some("OU"),
        "0.9.2342.19200300.100.1.1" => Some("UID"),
        "0.9.2342.19200300.100.1.25" => Some("DC"),
        _ => None,
    }
}

/// Escape one attribute value per RFC 2253 section 2.4.
fn escape_value(value: &str) -> String {
    let char_count = value.chars().count();
    let mut out = String::with_capacity(value.len());

    for (idx, ch) in value.chars().enumerate() {
        let escape = match ch {
            ',' | '+' | '"' | '\\' | '<' | '>' | ';' => true,
            '#' | ' ' if idx == 0 => true,
            ' ' if idx + 1 == char_count => true,
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        out.push(ch);
    }

    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Common Name lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Find the first `CN` attribute with a non-empty value in an RFC 2253
/// string, scanning left to right.
///
/// The scan splits on every literal `,` and on the first `=` of each
/// segment. Escaped separators inside attribute values get no special
/// treatment, so a value containing `\,` terminates its segment early.
/// Matching is case-sensitive: `cn=` is not a Common Name.
#[must_use]
pub fn common_name(dn: &str) -> Option<&str> {
    dn.split(',').find_map(|segment| {
        let (key, value) = segment.split_once('=')?;
        (key == "CN" && !value.is_empty()).then_some(value)
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
