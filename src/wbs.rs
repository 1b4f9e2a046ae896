//! The CLI's work-breakdown-structure (WBS) text format (§4.14).
//!
//! One directive per line; blank lines and `#`-prefixed comments are
//! ignored:
//!
//! ```text
//! ACT <id>
//! LINK <src_id> <dst_id>
//! ```
//!
//! `<id>` is a `u16` in `[0, 0xFFFE]`; `0xFFFF` is the reserved [`FAKE`]
//! sentinel and is rejected at parse time, same as the engine itself
//! rejects it as a caller-supplied activity id.

use crate::types::{AoaError, FAKE};

/// A parsed WBS: activity ids in declaration order, plus parallel
/// `lnk_src`/`lnk_dst` id arrays in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wbs {
    pub act_id: Vec<u16>,
    pub lnk_src: Vec<u16>,
    pub lnk_dst: Vec<u16>,
}

/// Parses a WBS text file's contents. Line numbers in error messages are
/// 1-based.
pub fn parse(text: &str) -> Result<Wbs, AoaError> {
    let mut wbs = Wbs::default();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let directive = parts.next().unwrap_or("");
        match directive {
            "ACT" => {
                let id = parse_id(parts.next(), lineno + 1)?;
                if parts.next().is_some() {
                    return Err(bad_line(lineno + 1, "ACT takes exactly one id"));
                }
                wbs.act_id.push(id);
            }
            "LINK" => {
                let src = parse_id(parts.next(), lineno + 1)?;
                let dst = parse_id(parts.next(), lineno + 1)?;
                if parts.next().is_some() {
                    return Err(bad_line(lineno + 1, "LINK takes exactly two ids"));
                }
                wbs.lnk_src.push(src);
                wbs.lnk_dst.push(dst);
            }
            other => {
                return Err(bad_line(lineno + 1, &format!("unknown directive '{}'", other)));
            }
        }
    }

    Ok(wbs)
}

fn parse_id(tok: Option<&str>, lineno: usize) -> Result<u16, AoaError> {
    let tok = tok.ok_or_else(|| bad_line(lineno, "missing id"))?;
    let id: u16 = tok
        .parse()
        .map_err(|_| bad_line(lineno, &format!("'{}' is not a valid id", tok)))?;
    if id == FAKE {
        return Err(bad_line(lineno, "id 0xFFFF is the reserved FAKE sentinel"));
    }
    Ok(id)
}

fn bad_line(lineno: usize, msg: &str) -> AoaError {
    AoaError::Invalid(format!("line {}: {}", lineno, msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_activities_and_links_in_order() {
        let text = "\
# a chain of three activities
ACT 1
ACT 2
ACT 3

LINK 1 2
LINK 2 3
";
        let wbs = parse(text).unwrap();
        assert_eq!(wbs.act_id, vec![1, 2, 3]);
        assert_eq!(wbs.lnk_src, vec![1, 2]);
        assert_eq!(wbs.lnk_dst, vec![2, 3]);
    }

    #[test]
    fn rejects_fake_sentinel_id() {
        let err = parse("ACT 65535\n").unwrap_err();
        assert!(matches!(err, AoaError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_directive() {
        assert!(parse("FOO 1\n").is_err());
        assert!(parse("ACT\n").is_err());
        assert!(parse("LINK 1\n").is_err());
        assert!(parse("ACT 1 2\n").is_err());
    }

    #[test]
    fn ignores_blank_lines_and_comments() {
        let wbs = parse("\n  \n# comment\nACT 7\n").unwrap();
        assert_eq!(wbs.act_id, vec![7]);
    }
}
