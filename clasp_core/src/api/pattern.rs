use crate::api::{CliOption, Options};
use crate::parser::ConfigError;
use crate::value::ValueKind;

const REQUIRED_CODE: char = '!';

/// Build a catalog from a compact pattern string.
///
/// Each character which is not a code declares a short option.
/// Codes following an option describe it: a kind code makes it take one value of that [`ValueKind`], and `!` makes it required.
///
/// | code | kind |
/// |------|------|
/// | `@`  | [`ValueKind::Object`] |
/// | `:`  | [`ValueKind::String`] |
/// | `%`  | [`ValueKind::Number`] |
/// | `+`  | [`ValueKind::Class`] |
/// | `#`  | [`ValueKind::Date`] |
/// | `<`  | [`ValueKind::ExistingFile`] |
/// | `>`  | [`ValueKind::File`] |
/// | `*`  | [`ValueKind::Files`] |
/// | `/`  | [`ValueKind::Url`] |
///
/// ### Example
/// ```
/// # use clasp_core as clasp;
/// use clasp::{parse_pattern, ValueKind};
///
/// let options = parse_pattern("vp:!f/").unwrap();
///
/// assert!(!options.option("v").unwrap().has_arg());
/// assert!(options.option("p").unwrap().is_required());
/// assert_eq!(options.option("f").unwrap().value_kind(), ValueKind::Url);
/// ```
pub fn parse_pattern(pattern: &str) -> Result<Options, ConfigError> {
    let mut options = Options::default();
    let mut current: Option<char> = None;
    let mut kind: Option<ValueKind> = None;
    let mut required = false;

    for ch in pattern.chars() {
        if ch == REQUIRED_CODE {
            required = true;
        } else if let Some(k) = ValueKind::from_pattern_code(ch) {
            kind.replace(k);
        } else {
            if let Some(short) = current.take() {
                options.add_option(declare(short, kind.take(), required)?);
                required = false;
            }

            current.replace(ch);
        }
    }

    if let Some(short) = current {
        options.add_option(declare(short, kind, required)?);
    }

    Ok(options)
}

fn declare(short: char, kind: Option<ValueKind>, required: bool) -> Result<CliOption, ConfigError> {
    let mut builder = CliOption::builder(short);

    if let Some(kind) = kind {
        builder = builder.has_arg().value_kind(kind);
    }

    if required {
        builder = builder.required();
    }

    builder.build()
}
