//! Renders [`ImageConstants`] as Go source.
//!
//! The output shape is fixed; only the quoted values vary.
use crate::consts::ImageConstants;
use models::constants::{GENERATED_HEADER, GO_PACKAGE};
use std::fmt::{self, Display, Formatter, Write};
use std::str;

/// The generated Go file for a set of image constants.
pub struct GoConstFile<'a> {
    consts: &'a ImageConstants,
}

impl<'a> GoConstFile<'a> {
    pub fn new(consts: &'a ImageConstants) -> Self {
        Self { consts }
    }

    /// (comment, identifier, value) for every declared constant, in file order.
    fn declarations(&self) -> [(&'static str, &'static str, &'a [u8]); 6] {
        let consts = self.consts;
        [
            (
                "User facing name of the operand application",
                "AppName",
                consts.app_name(),
            ),
            (
                "Version of the operator",
                "OperatorVersion",
                consts.operator_version(),
            ),
            (
                "Default image tag for the core application image",
                "DefaultCoreImageTag",
                consts.core_image_tag(),
            ),
            (
                "Default image tag for the datasource image",
                "DefaultDatasourceImageTag",
                consts.datasource_image_tag(),
            ),
            (
                "Default image tag for the dashboard image",
                "DefaultGrafanaImageTag",
                consts.grafana_image_tag(),
            ),
            (
                "Default image tag for the reports image",
                "DefaultReportsImageTag",
                consts.reports_image_tag(),
            ),
        ]
    }
}

impl Display for GoConstFile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", GENERATED_HEADER)?;
        writeln!(f, "package {}", GO_PACKAGE)?;
        for (comment, identifier, value) in self.declarations().iter() {
            writeln!(f)?;
            writeln!(f, "// {}", comment)?;
            writeln!(f, "const {} = {}", identifier, GoQuoted(*value))?;
        }
        Ok(())
    }
}

/// Renders the complete contents of the generated file.
pub fn render(consts: &ImageConstants) -> String {
    GoConstFile::new(consts).to_string()
}

/// A Go interpreted string literal holding the given bytes.
///
/// Escaping follows `strconv.Quote` for quotes, backslashes, control characters, invalid UTF-8
/// (`\xHH` per byte), non-ASCII spaces and invisible format characters. Other characters,
/// including unassigned code points, are written as UTF-8. The Go compiler decodes the literal
/// back to exactly the input bytes.
pub struct GoQuoted<'a>(pub &'a [u8]);

impl Display for GoQuoted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        let mut rest = self.0;
        loop {
            match str::from_utf8(rest) {
                Ok(valid) => {
                    write_escaped(f, valid)?;
                    break;
                }
                Err(err) => {
                    let (valid, after_valid) = rest.split_at(err.valid_up_to());
                    // Everything up to `valid_up_to` is known to be UTF-8.
                    write_escaped(f, str::from_utf8(valid).map_err(|_| fmt::Error)?)?;
                    let invalid_len = err.error_len().unwrap_or_else(|| after_valid.len());
                    let (invalid, remaining) = after_valid.split_at(invalid_len);
                    for byte in invalid {
                        write!(f, "\\x{:02x}", byte)?;
                    }
                    rest = remaining;
                }
            }
        }
        f.write_char('"')
    }
}

fn write_escaped(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{07}' => f.write_str("\\a")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{0B}' => f.write_str("\\v")?,
            c if c.is_ascii_control() => write!(f, "\\x{:02x}", c as u32)?,
            c if !is_printable(c) && (c as u32) < 0x10000 => write!(f, "\\u{:04x}", c as u32)?,
            c if !is_printable(c) => write!(f, "\\U{:08x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Control characters, spaces other than U+0020, and characters that render invisibly are
/// escaped rather than written raw.
fn is_printable(c: char) -> bool {
    !(c.is_control()
        || matches!(c,
            '\u{00A0}'
            | '\u{00AD}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200F}'
            | '\u{2028}'..='\u{202F}'
            | '\u{205F}'..='\u{2064}'
            | '\u{3000}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{E000}'..='\u{F8FF}'
        ))
}
