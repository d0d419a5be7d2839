//! `$DWGCODEPAGE` to text encoding mapping.
//!
//! Only files older than AutoCAD 2007 (AC1021) store text in a code page;
//! newer files are always UTF-8.

use encoding_rs::{self as enc, Encoding};

/// Fallback encoding for a `$DWGCODEPAGE` value (case-insensitive).
///
/// Returns `None` for ASCII / UTF-8 code pages. Unknown names map to
/// Windows-1252.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    let name = code_page.trim().to_ascii_lowercase();
    let encoding = match name.as_str() {
        "ascii" | "utf-8" | "utf8" | "unicode" => return None,

        "gb2312" | "ansi_936" => enc::GBK,
        "big5" | "ansi_950" => enc::BIG5,
        "korean" | "johab" | "ansi_949" => enc::EUC_KR,
        "ansi_932" => enc::SHIFT_JIS,

        // OEM pages without an exact encoding_rs counterpart use the
        // Windows page covering the same script
        "dos437" | "dos855" | "dos866" => enc::IBM866,
        "dos852" => enc::WINDOWS_1250,
        "dos857" => enc::WINDOWS_1254,
        "dos869" => enc::WINDOWS_1253,

        "ansi_874" => enc::WINDOWS_874,
        "ansi_1250" => enc::WINDOWS_1250,
        "ansi_1251" => enc::WINDOWS_1251,
        "ansi_1253" => enc::WINDOWS_1253,
        "ansi_1254" | "iso8859-9" | "iso_8859-9" => enc::WINDOWS_1254,
        "ansi_1255" => enc::WINDOWS_1255,
        "ansi_1256" => enc::WINDOWS_1256,
        "ansi_1257" => enc::WINDOWS_1257,
        "ansi_1258" => enc::WINDOWS_1258,

        "iso8859-2" | "iso_8859-2" => enc::ISO_8859_2,
        "iso8859-3" | "iso_8859-3" => enc::ISO_8859_3,
        "iso8859-4" | "iso_8859-4" => enc::ISO_8859_4,
        "iso8859-5" | "iso_8859-5" => enc::ISO_8859_5,
        "iso8859-6" | "iso_8859-6" => enc::ISO_8859_6,
        "iso8859-7" | "iso_8859-7" => enc::ISO_8859_7,
        "iso8859-8" | "iso_8859-8" => enc::ISO_8859_8,
        "iso8859-10" | "iso_8859-10" => enc::ISO_8859_10,
        "iso8859-13" | "iso_8859-13" => enc::ISO_8859_13,
        "iso8859-14" | "iso_8859-14" => enc::ISO_8859_14,
        "iso8859-15" | "iso_8859-15" => enc::ISO_8859_15,

        "koi8-r" => enc::KOI8_R,
        "koi8-u" => enc::KOI8_U,

        // ansi_1252, iso8859-1, Western DOS pages and anything unknown
        _ => enc::WINDOWS_1252,
    };
    Some(encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_pages_need_no_fallback() {
        for name in ["ASCII", "UTF-8", "utf8", "Unicode"] {
            assert_eq!(encoding_from_code_page(name), None, "{name}");
        }
    }

    #[test]
    fn test_windows_pages() {
        assert_eq!(encoding_from_code_page("ANSI_1252"), Some(enc::WINDOWS_1252));
        assert_eq!(encoding_from_code_page("ansi_1251"), Some(enc::WINDOWS_1251));
        assert_eq!(encoding_from_code_page(" ANSI_1250 "), Some(enc::WINDOWS_1250));
    }

    #[test]
    fn test_asian_pages() {
        assert_eq!(encoding_from_code_page("ANSI_932"), Some(enc::SHIFT_JIS));
        assert_eq!(encoding_from_code_page("GB2312"), Some(enc::GBK));
        assert_eq!(encoding_from_code_page("BIG5"), Some(enc::BIG5));
    }

    #[test]
    fn test_unknown_page_defaults_to_western() {
        assert_eq!(encoding_from_code_page("dos850"), Some(enc::WINDOWS_1252));
        assert_eq!(encoding_from_code_page("nonsense"), Some(enc::WINDOWS_1252));
    }
}
