//! `TTE:<domain>:<entity>:` request bodies and the daemon's reply literals.

use serde::Serialize;

pub const PREFIX: &str = "TTE";
pub const SEPARATOR: char = ':';

/// Reply body meaning "accepted".
pub const ACK_VALID: &str = "VALID";
/// Reply body the reference daemon sends for bodies it cannot parse.
pub const ACK_INVALID: &str = "INVALID";

const MIN_BODY_LEN: usize = 5;
const SEPARATOR_COUNT: usize = 3;

/// A request body split the way the daemon splits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedMessage<'a> {
    pub domain: &'a str,
    pub entity: &'a str,
}

/// Apply the daemon's acceptance rule to a request body.
///
/// A body is accepted only if it starts with `TTE:`, ends with `:` and holds
/// exactly three separators, so an entity containing `:` is rejected.
pub fn parse(body: &str) -> Option<ParsedMessage<'_>> {
    let head_len = PREFIX.len() + SEPARATOR.len_utf8();
    if body.len() < MIN_BODY_LEN
        || !body.starts_with(PREFIX)
        || body[PREFIX.len()..].chars().next() != Some(SEPARATOR)
        || !body.ends_with(SEPARATOR)
    {
        return None;
    }
    if body.matches(SEPARATOR).count() != SEPARATOR_COUNT {
        return None;
    }

    let inner = &body[head_len..body.len() - SEPARATOR.len_utf8()];
    let (domain, entity) = inner.split_once(SEPARATOR)?;
    Some(ParsedMessage { domain, entity })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_domain_and_entity() {
        let parsed = parse("TTE:Browser:example.com:").unwrap();
        assert_eq!(parsed.domain, "Browser");
        assert_eq!(parsed.entity, "example.com");
    }

    #[test]
    fn rejects_bodies_outside_the_grammar() {
        for body in [
            "",
            "TTE:",
            "TTE:Browser:example.com",
            "XTE:Browser:example.com:",
            "TTEBrowser::example.com:",
            "TTE:VSCode:a:b:",
            "TTE:Browser:example.com::",
        ] {
            assert!(parse(body).is_none(), "{body:?} should be rejected");
        }
    }

    #[test]
    fn empty_fields_are_grammatical() {
        let parsed = parse("TTE:::").unwrap();
        assert_eq!(parsed.domain, "");
        assert_eq!(parsed.entity, "");
    }
}
