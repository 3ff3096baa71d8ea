//! Download filename encoding for Content-Disposition headers.

/// Encode a file name for the `filename` parameter of a download response.
///
/// The Firefox family decodes the header bytes as Latin-1, so its names are
/// carried as raw UTF-8 bytes reinterpreted one byte per char; every other
/// client gets standard percent-encoding. Any `+` left after encoding would
/// decode as a space, so it is normalized to `%20`.
pub fn encode_download_filename(user_agent: &str, file_name: &str) -> String {
    let encoded: String = if user_agent.contains("Firefox") {
        file_name.bytes().map(char::from).collect()
    } else {
        urlencoding::encode(file_name).into_owned()
    };

    encoded.replace('+', "%20")
}

/// Build the full `Content-Disposition` value for an attachment.
pub fn content_disposition(user_agent: &str, file_name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"",
        encode_download_filename(user_agent, file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHROME_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0";
    const FIREFOX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

    #[test]
    fn test_plain_ascii_passes_through() {
        assert_eq!(
            encode_download_filename(CHROME_UA, "report.xlsx"),
            "report.xlsx"
        );
    }

    #[test]
    fn test_spaces_and_plus_are_percent_encoded() {
        let encoded = encode_download_filename(CHROME_UA, "q1+q2 report.xlsx");
        assert_eq!(encoded, "q1%2Bq2%20report.xlsx");
        assert!(!encoded.contains('+'));
    }

    #[test]
    fn test_non_ascii_is_percent_encoded() {
        let encoded = encode_download_filename(CHROME_UA, "résumé.xlsx");
        assert_eq!(encoded, "r%C3%A9sum%C3%A9.xlsx");
        // Every non-alphanumeric byte is a valid %XX triplet.
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '%' || c == '.'));
    }

    #[test]
    fn test_firefox_gets_raw_byte_reinterpretation() {
        // "é" is 0xC3 0xA9 in UTF-8; each byte becomes its own char.
        let encoded = encode_download_filename(FIREFOX_UA, "é.xlsx");
        assert_eq!(encoded, "\u{c3}\u{a9}.xlsx");
    }

    #[test]
    fn test_content_disposition_wraps_encoded_name() {
        assert_eq!(
            content_disposition(CHROME_UA, "a b.xlsx"),
            "attachment; filename=\"a%20b.xlsx\""
        );
    }
}
